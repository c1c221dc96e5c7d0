//! Navigation collaborator seen by the step controllers.

use super::route::{RouteParams, StepName};

/// Mounts named steps on behalf of the wizard.
pub trait Navigator {
    fn navigate(&mut self, step: StepName, params: &RouteParams);

    fn go_back(&mut self);

    /// Leaves the flow entirely and shows `landing`.
    fn exit_to(&mut self, landing: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavIntent {
    Navigate { step: StepName, params: RouteParams },
    GoBack,
    Exit { landing: String },
}

/// In-memory stack navigator that records every intent it receives.
///
/// Navigating to a step already on the stack pops back to it, the way a
/// stack navigator returns to an existing route.
#[derive(Debug, Default)]
pub struct StackNavigator {
    stack: Vec<(StepName, RouteParams)>,
    intents: Vec<NavIntent>,
    exited_to: Option<String>,
}

impl StackNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<StepName> {
        self.stack.last().map(|(step, _)| *step)
    }

    pub fn current_params(&self) -> Option<&RouteParams> {
        self.stack.last().map(|(_, params)| params)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn intents(&self) -> &[NavIntent] {
        &self.intents
    }

    pub fn last_intent(&self) -> Option<&NavIntent> {
        self.intents.last()
    }

    pub fn exited_to(&self) -> Option<&str> {
        self.exited_to.as_deref()
    }

    pub fn clear_intents(&mut self) {
        self.intents.clear();
    }
}

impl Navigator for StackNavigator {
    fn navigate(&mut self, step: StepName, params: &RouteParams) {
        self.intents.push(NavIntent::Navigate {
            step,
            params: params.clone(),
        });
        self.exited_to = None;
        match self.stack.iter().position(|(existing, _)| *existing == step) {
            Some(index) => {
                self.stack.truncate(index + 1);
                self.stack[index].1 = params.clone();
            }
            None => self.stack.push((step, params.clone())),
        }
    }

    fn go_back(&mut self) {
        self.intents.push(NavIntent::GoBack);
        self.stack.pop();
    }

    fn exit_to(&mut self, landing: &str) {
        self.intents.push(NavIntent::Exit {
            landing: landing.to_string(),
        });
        self.stack.clear();
        self.exited_to = Some(landing.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigate_to_existing_step_pops_back() {
        let mut nav = StackNavigator::new();
        let params = RouteParams::default();
        nav.navigate(StepName::Category, &params);
        nav.navigate(StepName::Details, &params);
        nav.navigate(StepName::Location, &params);
        nav.navigate(StepName::Details, &params);
        assert_eq!(nav.current(), Some(StepName::Details));
        assert_eq!(nav.depth(), 2);
        assert_eq!(nav.intents().len(), 4);
    }

    #[test]
    fn exit_clears_the_stack() {
        let mut nav = StackNavigator::new();
        nav.navigate(StepName::Category, &RouteParams::for_group("g1"));
        assert_eq!(
            nav.current_params().and_then(|params| params.group_id.as_deref()),
            Some("g1")
        );
        nav.exit_to("Home");
        assert_eq!(nav.current(), None);
        assert_eq!(nav.exited_to(), Some("Home"));
        assert_eq!(
            nav.last_intent(),
            Some(&NavIntent::Exit {
                landing: "Home".into()
            })
        );
    }
}
