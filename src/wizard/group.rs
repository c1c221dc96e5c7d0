//! Group-side rules: deleting a group and attaching submitted requests.

use crate::domain::{Group, GroupBook, GroupRequest, RequestStatus};
use crate::errors::PolicyBlock;

use super::navigation::Navigator;

/// A group may only be deleted once it owns no requests.
pub fn ensure_deletable(group: &Group) -> Result<(), PolicyBlock> {
    if group.has_requests() {
        return Err(PolicyBlock::HasActiveRequests {
            group_id: group.id.clone(),
            count: group.requests.len(),
        });
    }
    Ok(())
}

/// Deletes an empty group and leaves for `landing`.
///
/// A group that still owns requests is left exactly as it was.
pub fn delete_group(
    groups: &mut GroupBook,
    group_id: &str,
    navigator: &mut dyn Navigator,
    landing: &str,
) -> Result<Group, PolicyBlock> {
    let group = groups
        .get(group_id)
        .ok_or_else(|| PolicyBlock::UnknownGroup(group_id.to_string()))?;
    if let Err(block) = ensure_deletable(group) {
        tracing::warn!(group_id, rule = block.kind(), "group deletion blocked");
        return Err(block);
    }
    let removed = groups
        .remove(group_id)
        .ok_or_else(|| PolicyBlock::UnknownGroup(group_id.to_string()))?;
    tracing::info!(group_id, "group deleted");
    navigator.exit_to(landing);
    Ok(removed)
}

/// Records a submitted request as pending on its group.
pub(crate) fn attach_pending(
    groups: &mut GroupBook,
    group_id: &str,
    request_id: &str,
) -> Result<(), PolicyBlock> {
    if groups.attach(group_id, GroupRequest::new(request_id, RequestStatus::Pending)) {
        Ok(())
    } else {
        Err(PolicyBlock::UnknownGroup(group_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::navigation::{NavIntent, StackNavigator};

    #[test]
    fn empty_group_is_deleted_and_navigation_leaves() {
        let mut groups = GroupBook::new();
        groups.upsert(Group::new("g1", "Office move"));
        let mut nav = StackNavigator::new();

        let removed = delete_group(&mut groups, "g1", &mut nav, "Groups").unwrap();
        assert_eq!(removed.id, "g1");
        assert!(!groups.contains("g1"));
        assert_eq!(
            nav.intents(),
            &[NavIntent::Exit {
                landing: "Groups".into()
            }]
        );
    }

    #[test]
    fn group_with_pending_request_is_kept() {
        let mut groups = GroupBook::new();
        let group = Group::new("g1", "Office move")
            .with_requests(vec![GroupRequest::new("r1", RequestStatus::Pending)]);
        groups.upsert(group.clone());
        let mut nav = StackNavigator::new();

        let block = delete_group(&mut groups, "g1", &mut nav, "Groups").unwrap_err();
        assert_eq!(block.kind(), "HAS_ACTIVE_REQUESTS");
        assert_eq!(groups.get("g1"), Some(&group));
        assert!(nav.intents().is_empty());
    }

    #[test]
    fn finished_requests_still_block_deletion() {
        let group = Group::new("g2", "Renovation")
            .with_requests(vec![GroupRequest::new("r9", RequestStatus::Finished)]);
        assert!(matches!(
            ensure_deletable(&group),
            Err(PolicyBlock::HasActiveRequests { count: 1, .. })
        ));
    }

    #[test]
    fn unknown_group_is_refused() {
        let mut groups = GroupBook::new();
        let mut nav = StackNavigator::new();
        assert_eq!(
            delete_group(&mut groups, "nope", &mut nav, "Groups"),
            Err(PolicyBlock::UnknownGroup("nope".into()))
        );
        assert_eq!(
            attach_pending(&mut groups, "nope", "r1"),
            Err(PolicyBlock::UnknownGroup("nope".into()))
        );
    }
}
