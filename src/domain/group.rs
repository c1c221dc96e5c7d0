use serde::{Deserialize, Serialize};

use super::request::RequestStatus;

/// A request attached to a group, as the group aggregate sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRequest {
    pub id: String,
    pub status: RequestStatus,
}

impl GroupRequest {
    pub fn new(id: impl Into<String>, status: RequestStatus) -> Self {
        Self {
            id: id.into(),
            status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub requests: Vec<GroupRequest>,
}

impl Group {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            requests: Vec::new(),
        }
    }

    pub fn with_requests(mut self, requests: Vec<GroupRequest>) -> Self {
        self.requests = requests;
        self
    }

    pub fn has_requests(&self) -> bool {
        !self.requests.is_empty()
    }
}

/// In-memory collection of groups, ordered by insertion.
#[derive(Debug, Clone, Default)]
pub struct GroupBook {
    groups: Vec<Group>,
}

impl GroupBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a group with the same id.
    pub fn upsert(&mut self, group: Group) {
        match self.groups.iter_mut().find(|existing| existing.id == group.id) {
            Some(existing) => *existing = group,
            None => self.groups.push(group),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|group| group.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Removes a group unconditionally. Callers enforce the delete policy.
    pub(crate) fn remove(&mut self, id: &str) -> Option<Group> {
        let index = self.groups.iter().position(|group| group.id == id)?;
        Some(self.groups.remove(index))
    }

    /// Attaches a request, or refreshes its status when it is already attached.
    pub(crate) fn attach(&mut self, group_id: &str, request: GroupRequest) -> bool {
        let Some(group) = self.groups.iter_mut().find(|group| group.id == group_id) else {
            return false;
        };
        match group
            .requests
            .iter_mut()
            .find(|existing| existing.id == request.id)
        {
            Some(existing) => existing.status = request.status,
            None => group.requests.push(request),
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_refreshes_existing_entries() {
        let mut book = GroupBook::new();
        book.upsert(Group::new("g1", "Office move"));
        assert!(book.attach("g1", GroupRequest::new("r1", RequestStatus::Declined)));
        assert!(book.attach("g1", GroupRequest::new("r1", RequestStatus::Pending)));
        let group = book.get("g1").unwrap();
        assert_eq!(group.requests, vec![GroupRequest::new("r1", RequestStatus::Pending)]);
        assert!(!book.attach("missing", GroupRequest::new("r2", RequestStatus::Pending)));
    }

    #[test]
    fn upsert_replaces_by_id() {
        let mut book = GroupBook::new();
        book.upsert(Group::new("g1", "Old"));
        book.upsert(Group::new("g1", "New"));
        assert_eq!(book.groups().len(), 1);
        assert_eq!(book.get("g1").unwrap().name, "New");
        assert!(book.remove("g1").is_some());
        assert!(!book.contains("g1"));
    }
}
