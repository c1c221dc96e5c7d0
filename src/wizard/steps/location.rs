use crate::config::DraftLimits;
use crate::domain::{Location, Timing};
use crate::wizard::controller::{StepContext, StepController};
use crate::wizard::route::StepName;
use crate::wizard::store::{DraftAction, DraftStore};
use crate::wizard::validation::{check_location, check_timing, ValidationReport};

/// Where and when: owns both the location and the timing slices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationStep {
    location: Location,
    timing: Timing,
    limits: DraftLimits,
}

impl LocationStep {
    pub fn mount(ctx: &StepContext<'_>) -> Self {
        let draft = ctx.hydrate();
        Self {
            location: draft.location,
            timing: draft.timing,
            limits: ctx.config.limits(),
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    pub fn set_city(&mut self, store: &DraftStore, city: &str) {
        self.location.city = city.to_string();
        self.sync_location(store);
    }

    pub fn set_street(&mut self, store: &DraftStore, street: &str) {
        self.location.street = street.to_string();
        self.sync_location(store);
    }

    pub fn set_building(&mut self, store: &DraftStore, building: &str) {
        self.location.building = building.to_string();
        self.sync_location(store);
    }

    /// Adds a picked image. Returns `false` once the cap is reached.
    pub fn add_image(&mut self, store: &DraftStore, uri: &str) -> bool {
        let uri = uri.trim();
        if uri.is_empty() || self.location.images.len() >= self.limits.max_images {
            return false;
        }
        self.location.images.push(uri.to_string());
        self.sync_location(store);
        true
    }

    pub fn remove_image(&mut self, store: &DraftStore, index: usize) -> Option<String> {
        if index >= self.location.images.len() {
            return None;
        }
        let removed = self.location.images.remove(index);
        self.sync_location(store);
        Some(removed)
    }

    pub fn set_urgent(&mut self, store: &DraftStore) {
        self.timing = Timing::urgent();
        self.sync_timing(store);
    }

    pub fn set_flexible(&mut self, store: &DraftStore, day: &str, time_slot: &str) {
        self.timing = Timing::flexible(day.trim(), time_slot.trim());
        self.sync_timing(store);
    }

    fn sync_location(&self, store: &DraftStore) {
        store.dispatch(DraftAction::SetLocation(self.location.clone()));
    }

    fn sync_timing(&self, store: &DraftStore) {
        store.dispatch(DraftAction::SetTiming(self.timing.clone()));
    }
}

impl StepController for LocationStep {
    fn step(&self) -> StepName {
        StepName::Location
    }

    fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        report.check(check_location(&self.location, &self.limits));
        report.check(check_timing(&self.timing));
        report
    }

    fn commit(&self, store: &DraftStore) {
        let location = Location {
            city: self.location.city.trim().to_string(),
            street: self.location.street.trim().to_string(),
            building: self.location.building.trim().to_string(),
            images: self.location.images.clone(),
        };
        store.dispatch(DraftAction::SetLocation(location));
        self.sync_timing(store);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WizardConfig;
    use crate::domain::TimingKind;
    use crate::wizard::controller::StepOutcome;
    use crate::wizard::navigation::StackNavigator;
    use crate::wizard::route::RouteParams;
    use crate::wizard::store::FlowKind;
    use crate::wizard::validation::DraftField;

    #[test]
    fn city_is_the_minimum_location() {
        let store = DraftStore::new(FlowKind::Individual);
        let config = WizardConfig::default();
        let params = RouteParams::default();
        let mut nav = StackNavigator::new();
        let mut ctx = StepContext::new(&store, &mut nav, &params, &config);

        let mut step = LocationStep::mount(&ctx);
        step.set_urgent(ctx.store);
        match step.next(&mut ctx) {
            StepOutcome::Blocked(report) => assert_eq!(report.fields(), vec![DraftField::City]),
            other => panic!("expected a block, got {other:?}"),
        }

        step.set_city(ctx.store, " Lisbon ");
        assert_eq!(
            step.next(&mut ctx),
            StepOutcome::Advanced {
                to: StepName::Budget
            }
        );
        let draft = store.get_state();
        assert_eq!(draft.location, Location::in_city("Lisbon"));
        assert_eq!(draft.timing.kind, TimingKind::Urgent);
    }

    #[test]
    fn image_cap_comes_from_config() {
        let store = DraftStore::new(FlowKind::Individual);
        let config = WizardConfig {
            max_images: 2,
            ..WizardConfig::default()
        };
        let params = RouteParams::default();
        let mut nav = StackNavigator::new();
        let ctx = StepContext::new(&store, &mut nav, &params, &config);

        let mut step = LocationStep::mount(&ctx);
        assert!(step.add_image(ctx.store, "file:///a.jpg"));
        assert!(step.add_image(ctx.store, "file:///b.jpg"));
        assert!(!step.add_image(ctx.store, "file:///c.jpg"));
        assert_eq!(step.remove_image(ctx.store, 0).as_deref(), Some("file:///a.jpg"));
        assert_eq!(step.remove_image(ctx.store, 5), None);
        assert_eq!(
            store.get_state().location.images,
            vec!["file:///b.jpg".to_string()]
        );
    }

    #[test]
    fn flexible_timing_reports_missing_slot() {
        let store = DraftStore::new(FlowKind::Individual);
        let config = WizardConfig::default();
        let params = RouteParams::default();
        let mut nav = StackNavigator::new();
        let ctx = StepContext::new(&store, &mut nav, &params, &config);

        let mut step = LocationStep::mount(&ctx);
        step.set_city(ctx.store, "Porto");
        step.set_flexible(ctx.store, "Saturday", "");
        assert_eq!(step.validate().fields(), vec![DraftField::TimingSlot]);
        step.set_flexible(ctx.store, "Saturday", "Afternoon");
        assert!(step.can_proceed());
        assert_eq!(
            store.get_state().timing,
            Timing::flexible("Saturday", "Afternoon")
        );
    }
}
