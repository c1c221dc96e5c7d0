//! Shell context and command dispatch for the wizard driver.

use strsim::levenshtein;
use thiserror::Error;
use uuid::Uuid;

use crate::config::{ConfigManager, WizardConfig};
use crate::domain::{
    BudgetKind, Group, GroupBook, GroupRequest, ProviderRef, RequestStatus, ServiceRequest,
};
use crate::errors::{PolicyBlock, WizardError};
use crate::wizard::controller::{cancel_flow, go_back};
use crate::wizard::{
    delete_group, BudgetForm, CategoryStep, Confirmer, DetailsStep, FixedAnswer, FlowKind,
    LocationStep, MockSubmitSink, ProviderStep, ReviewStep, StackNavigator,
    StepContext, StepController, StepName, StepOutcome, SubmitOutcome, ValidationReport,
    WizardSession,
};

use super::io::{parse_discard_answer, TerminalConfirmer};
use super::output;

const COMMANDS: &[&str] = &[
    "help",
    "start",
    "resume",
    "edit",
    "group",
    "groups",
    "requests",
    "decline",
    "categories",
    "category",
    "title",
    "description",
    "city",
    "street",
    "building",
    "image",
    "urgent",
    "flexible",
    "budget",
    "amount",
    "rate",
    "provider",
    "next",
    "back",
    "cancel",
    "submit",
    "show",
    "exit",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// User-facing CLI error wrapper.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] WizardError),
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl From<rustyline::error::ReadlineError> for CliError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        CliError::Terminal(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Terminal(err.to_string())
    }
}

/// Problems with a single command line. Reported, never fatal.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("No request in progress. Type `start` to begin.")]
    NoSession,
    #[error("The request flow is paused. Type `resume` to continue.")]
    NotMounted,
    #[error("`{command}` belongs to the {expected} step; you are on {current}.")]
    WrongStep {
        command: String,
        expected: &'static str,
        current: StepName,
    },
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("{0}")]
    Blocked(#[from] PolicyBlock),
    #[error("{0}")]
    Input(String),
}

pub type CommandResult = Result<LoopControl, CommandError>;

pub struct ShellContext {
    pub mode: CliMode,
    pub running: bool,
    config: WizardConfig,
    session: Option<WizardSession>,
    navigator: StackNavigator,
    groups: GroupBook,
    sink: MockSubmitSink,
    awaiting_discard: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config = ConfigManager::new()?.load()?;
        Ok(Self::with_config(mode, config))
    }

    pub fn with_config(mode: CliMode, config: WizardConfig) -> Self {
        Self {
            mode,
            running: true,
            config,
            session: None,
            navigator: StackNavigator::new(),
            groups: GroupBook::new(),
            sink: MockSubmitSink::new(),
            awaiting_discard: false,
        }
    }

    pub fn prompt(&self) -> String {
        match self.navigator.current() {
            Some(step) if self.session.is_some() => format!("request[{}]> ", step.title()),
            _ => "request> ".to_string(),
        }
    }

    pub fn command_names(&self) -> &'static [&'static str] {
        COMMANDS
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::Blocked(block) => {
                output::error(format!("{} ({})", block, block.kind()));
            }
            other => output::warning(other),
        }
    }

    pub(crate) fn dispatch(&mut self, command: &str, args: &[&str]) -> CommandResult {
        if self.awaiting_discard {
            self.awaiting_discard = false;
            let answer = std::iter::once(command)
                .chain(args.iter().copied())
                .collect::<Vec<_>>()
                .join(" ");
            let mut confirmer = FixedAnswer(parse_discard_answer(&answer));
            return self.cancel_with(&mut confirmer);
        }

        match command {
            "help" => self.print_help(),
            "exit" | "quit" => return Ok(LoopControl::Exit),
            "start" => self.start(args)?,
            "resume" => self.resume()?,
            "edit" => self.edit(args)?,
            "group" => self.group(args)?,
            "groups" => self.list_groups(),
            "requests" => self.list_requests(),
            "decline" => self.decline(args)?,
            "categories" => {
                for category in &self.config.categories {
                    output::detail(category);
                }
            }
            "category" => {
                let name = joined(args, "category <name>")?;
                self.with_step(StepName::Category, command, |ctx| {
                    CategoryStep::mount(ctx).select(ctx.store, &name);
                })?;
            }
            "title" | "description" => {
                let text = joined(args, "title <text> | description <text>")?;
                let is_title = command == "title";
                self.with_step(StepName::Details, command, |ctx| {
                    let mut step = DetailsStep::mount(ctx);
                    if is_title {
                        step.set_title(ctx.store, &text);
                    } else {
                        step.set_description(ctx.store, &text);
                    }
                })?;
            }
            "city" | "street" | "building" => {
                let text = joined(args, "city|street|building <text>")?;
                let field = command.to_string();
                self.with_step(StepName::Location, command, |ctx| {
                    let mut step = LocationStep::mount(ctx);
                    match field.as_str() {
                        "city" => step.set_city(ctx.store, &text),
                        "street" => step.set_street(ctx.store, &text),
                        _ => step.set_building(ctx.store, &text),
                    }
                })?;
            }
            "image" => {
                let uri = joined(args, "image <uri>")?;
                let max = self.config.max_images;
                let added = self.with_step(StepName::Location, command, |ctx| {
                    LocationStep::mount(ctx).add_image(ctx.store, &uri)
                })?;
                if !added {
                    output::warning(format!("At most {} images can be attached.", max));
                }
            }
            "urgent" => {
                self.with_step(StepName::Location, command, |ctx| {
                    LocationStep::mount(ctx).set_urgent(ctx.store);
                })?;
            }
            "flexible" => {
                let [day, slot] = args else {
                    return Err(CommandError::Usage("flexible <day> <time-slot>"));
                };
                self.with_step(StepName::Location, command, |ctx| {
                    LocationStep::mount(ctx).set_flexible(ctx.store, day, slot);
                })?;
            }
            "budget" => {
                let choice = args.first().map(|value| value.to_ascii_lowercase());
                self.with_step(StepName::Budget, command, |ctx| {
                    let mut form = BudgetForm::mount(ctx);
                    match choice.as_deref() {
                        Some("none") => form.set_has_budget(ctx.store, false),
                        Some("yes") => form.set_has_budget(ctx.store, true),
                        Some("fixed") => form.choose_kind(ctx.store, BudgetKind::Fixed),
                        Some("hourly") => form.choose_kind(ctx.store, BudgetKind::Hourly),
                        _ => return Err(CommandError::Usage("budget none|yes|fixed|hourly")),
                    }
                    Ok(())
                })??;
            }
            "amount" | "rate" => {
                let raw = args.join(" ");
                let is_amount = command == "amount";
                self.with_step(StepName::Budget, command, |ctx| {
                    let mut form = BudgetForm::mount(ctx);
                    if is_amount {
                        form.set_amount(ctx.store, &raw);
                    } else {
                        form.set_hourly_rate(ctx.store, &raw);
                    }
                })?;
            }
            "provider" => {
                let provider = match args {
                    ["all"] => None,
                    [id, name @ ..] if !name.is_empty() => {
                        Some(ProviderRef::new(*id, name.join(" ")))
                    }
                    _ => return Err(CommandError::Usage("provider all | provider <id> <name>")),
                };
                self.with_step(StepName::ProviderSelection, command, |ctx| {
                    let mut step = ProviderStep::mount(ctx);
                    match provider {
                        Some(provider) => step.choose_provider(ctx.store, provider),
                        None => step.choose_all(ctx.store),
                    }
                })?;
            }
            "next" => self.next()?,
            "back" => self.back()?,
            "cancel" => return self.cancel(),
            "submit" => self.submit()?,
            "show" => self.show()?,
            other => self.unknown(other),
        }
        Ok(LoopControl::Continue)
    }

    /// Runs `f` against the mounted step, provided it is `expected`.
    fn with_step<R>(
        &mut self,
        expected: StepName,
        command: &str,
        f: impl FnOnce(&mut StepContext<'_>) -> R,
    ) -> Result<R, CommandError> {
        let session = self.session.as_ref().ok_or(CommandError::NoSession)?;
        let current = self.navigator.current().ok_or(CommandError::NotMounted)?;
        if current != expected {
            return Err(CommandError::WrongStep {
                command: command.to_string(),
                expected: expected.title(),
                current,
            });
        }
        let mut ctx = session.context(&mut self.navigator);
        Ok(f(&mut ctx))
    }

    fn mounted(&mut self) -> Result<(&WizardSession, StepName, &mut StackNavigator), CommandError> {
        let session = self.session.as_ref().ok_or(CommandError::NoSession)?;
        let current = self.navigator.current().ok_or(CommandError::NotMounted)?;
        Ok((session, current, &mut self.navigator))
    }

    fn start(&mut self, args: &[&str]) -> Result<(), CommandError> {
        let session = match args {
            [] => WizardSession::individual(self.config.clone()),
            ["group", group_id] => {
                if !self.groups.contains(group_id) {
                    return Err(PolicyBlock::UnknownGroup(group_id.to_string()).into());
                }
                WizardSession::group(self.config.clone(), *group_id)
            }
            _ => return Err(CommandError::Usage("start | start group <group-id>")),
        };
        self.replace_session(session);
        Ok(())
    }

    fn edit(&mut self, args: &[&str]) -> Result<(), CommandError> {
        let request = self.find_request(args, "edit <request-id>")?.clone();
        let session = WizardSession::edit(self.config.clone(), &request)?;
        self.replace_session(session);
        Ok(())
    }

    fn replace_session(&mut self, session: WizardSession) {
        if self.session.is_some() {
            output::info("Discarding the previous draft.");
        }
        self.navigator = StackNavigator::new();
        session.begin(&mut self.navigator);
        let kind = match session.flow() {
            FlowKind::Individual => "individual",
            FlowKind::Group => "group",
        };
        output::success(format!("Started a new {} request.", kind));
        self.session = Some(session);
        self.print_step();
    }

    fn resume(&mut self) -> Result<(), CommandError> {
        let session = self.session.as_ref().ok_or(CommandError::NoSession)?;
        if self.navigator.current().is_none() {
            session.begin(&mut self.navigator);
        }
        self.print_step();
        Ok(())
    }

    fn next(&mut self) -> Result<(), CommandError> {
        let (session, current, navigator) = self.mounted()?;
        let mut ctx = session.context(navigator);
        let outcome = match current {
            StepName::Category => CategoryStep::mount(&ctx).next(&mut ctx),
            StepName::Details => DetailsStep::mount(&ctx).next(&mut ctx),
            StepName::Location => LocationStep::mount(&ctx).next(&mut ctx),
            StepName::Budget => BudgetForm::mount(&ctx).next(&mut ctx),
            StepName::ProviderSelection => ProviderStep::mount(&ctx).next(&mut ctx),
            StepName::Review => {
                output::info("This is the last step. Type `submit` to send the request.");
                return Ok(());
            }
        };
        self.report_outcome(outcome);
        Ok(())
    }

    fn back(&mut self) -> Result<(), CommandError> {
        let (session, current, navigator) = self.mounted()?;
        let mut ctx = session.context(navigator);
        let outcome = go_back(current, &mut ctx);
        self.report_outcome(outcome);
        Ok(())
    }

    fn cancel(&mut self) -> CommandResult {
        self.mounted()?;
        match self.mode {
            CliMode::Interactive => {
                let mut confirmer = TerminalConfirmer::new();
                self.cancel_with(&mut confirmer)
            }
            CliMode::Script => {
                output::info("Discard request? Everything entered so far will be lost. [yes/no]");
                self.awaiting_discard = true;
                Ok(LoopControl::Continue)
            }
        }
    }

    fn cancel_with(&mut self, confirmer: &mut dyn Confirmer) -> CommandResult {
        let (session, _, navigator) = self.mounted()?;
        let mut ctx = session.context(navigator);
        let outcome = cancel_flow(&mut ctx, confirmer);
        if matches!(outcome, StepOutcome::Exited { .. }) {
            self.session = None;
        }
        self.report_outcome(outcome);
        Ok(LoopControl::Continue)
    }

    fn submit(&mut self) -> Result<(), CommandError> {
        let session = self.session.as_ref().ok_or(CommandError::NoSession)?;
        let current = self.navigator.current().ok_or(CommandError::NotMounted)?;
        if current != StepName::Review {
            return Err(CommandError::WrongStep {
                command: "submit".into(),
                expected: StepName::Review.title(),
                current,
            });
        }
        let groups = match session.flow() {
            FlowKind::Group => Some(&mut self.groups),
            FlowKind::Individual => None,
        };
        let mut ctx = session.context(&mut self.navigator);
        let review = ReviewStep::mount(&ctx);
        let outcome = review.submit(&mut ctx, &mut self.sink, groups);
        match outcome {
            SubmitOutcome::Submitted(request) => {
                output::success(format!(
                    "Request {} submitted ({}).",
                    short_id(request.id),
                    request.status
                ));
                self.session = None;
                self.print_exit();
            }
            SubmitOutcome::Blocked(report) => self.print_blocked(&report),
            SubmitOutcome::Refused(block) => return Err(block.into()),
            SubmitOutcome::Failed(err) => output::error(err),
        }
        Ok(())
    }

    fn show(&mut self) -> Result<(), CommandError> {
        let (session, current, navigator) = self.mounted()?;
        let ctx = session.context(navigator);
        let review = ReviewStep::mount(&ctx);
        let ready = match current {
            StepName::Category => CategoryStep::mount(&ctx).can_proceed(),
            StepName::Details => DetailsStep::mount(&ctx).can_proceed(),
            StepName::Location => LocationStep::mount(&ctx).can_proceed(),
            StepName::Budget => BudgetForm::mount(&ctx).can_proceed(),
            StepName::ProviderSelection => ProviderStep::mount(&ctx).can_proceed(),
            StepName::Review => review.can_submit(),
        };
        let banner = (current == StepName::Budget)
            .then(|| BudgetForm::mount(&ctx).banner())
            .flatten();

        output::section(current);
        if let Some(banner) = banner {
            output::info(banner);
        }
        for line in review.summary_lines() {
            output::detail(line);
        }
        let action = if current == StepName::Review { "Submit" } else { "Next" };
        let state = if ready { "enabled" } else { "disabled" };
        output::detail(format!("{}: {}", action, state));
        Ok(())
    }

    fn group(&mut self, args: &[&str]) -> Result<(), CommandError> {
        match args {
            ["add", id, name @ ..] if !name.is_empty() => {
                self.groups.upsert(Group::new(*id, name.join(" ")));
                output::success(format!("Group `{}` saved.", id));
            }
            ["delete", id] => {
                let mut navigator = StackNavigator::new();
                let landing = self.config.group_landing_screen.clone();
                delete_group(&mut self.groups, id, &mut navigator, &landing)?;
                output::success(format!("Group `{}` deleted. Back to {}.", id, landing));
            }
            _ => return Err(CommandError::Usage("group add <id> <name> | group delete <id>")),
        }
        Ok(())
    }

    fn list_groups(&self) {
        if self.groups.groups().is_empty() {
            output::info("No groups defined.");
            return;
        }
        for group in self.groups.groups() {
            output::detail(format!(
                "{} – {} ({} request(s))",
                group.id,
                group.name,
                group.requests.len()
            ));
        }
    }

    fn list_requests(&self) {
        if self.sink.accepted().is_empty() {
            output::info("No requests submitted.");
            return;
        }
        for request in self.sink.accepted() {
            output::detail(format!(
                "[{}] {} – {}",
                short_id(request.id),
                request.status,
                request.title
            ));
        }
    }

    fn decline(&mut self, args: &[&str]) -> Result<(), CommandError> {
        let request = self.find_request(args, "decline <request-id>")?;
        let (id, group_id) = (request.id, request.group_id.clone());
        self.sink.set_status(id, RequestStatus::Declined);
        if let Some(group_id) = group_id {
            let entry = GroupRequest::new(id.to_string(), RequestStatus::Declined);
            if !self.groups.attach(&group_id, entry) {
                tracing::warn!(group_id = %group_id, request_id = %id, "declined request has no group");
            }
        }
        output::success(format!("Request {} marked as declined.", short_id(id)));
        Ok(())
    }

    fn find_request(&self, args: &[&str], usage: &'static str) -> Result<&ServiceRequest, CommandError> {
        let [prefix] = args else {
            return Err(CommandError::Usage(usage));
        };
        let matches: Vec<&ServiceRequest> = self
            .sink
            .accepted()
            .iter()
            .filter(|request| request.id.to_string().starts_with(prefix))
            .collect();
        match matches.as_slice() {
            [request] => Ok(*request),
            [] => Err(CommandError::Input(format!("No request matches `{}`.", prefix))),
            _ => Err(CommandError::Input(format!(
                "`{}` matches several requests; use more characters.",
                prefix
            ))),
        }
    }

    fn report_outcome(&self, outcome: StepOutcome) {
        match outcome {
            StepOutcome::Advanced { .. } | StepOutcome::WentBack { to: Some(_) } => {
                self.print_step()
            }
            StepOutcome::WentBack { to: None } => {
                output::info("Left the request flow. The draft is kept; type `resume` to continue.")
            }
            StepOutcome::Blocked(report) => self.print_blocked(&report),
            StepOutcome::Stayed => output::info("Keeping your draft."),
            StepOutcome::Exited { .. } => {
                output::success("Request discarded.");
                self.print_exit();
            }
        }
    }

    fn print_blocked(&self, report: &ValidationReport) {
        for issue in report.issues() {
            output::warning(issue);
        }
    }

    fn print_step(&self) {
        if let Some(step) = self.navigator.current() {
            output::section(step);
        }
    }

    fn print_exit(&self) {
        if let Some(landing) = self.navigator.exited_to() {
            output::info(format!("Back to {}.", landing));
        }
    }

    fn print_help(&self) {
        output::section("Commands");
        for line in [
            "start | start group <id> | resume | edit <request-id>",
            "category <name> | categories",
            "title <text> | description <text>",
            "city|street|building <text> | image <uri> | urgent | flexible <day> <slot>",
            "budget none|yes|fixed|hourly | amount <value> | rate <value>",
            "provider all | provider <id> <name>",
            "next | back | cancel | submit | show",
            "group add <id> <name> | group delete <id> | groups",
            "requests | decline <request-id> | exit",
        ] {
            output::detail(line);
        }
    }

    fn unknown(&self, input: &str) {
        output::warning(format!("Unknown command `{}`.", input));
        let best = COMMANDS
            .iter()
            .map(|candidate| (levenshtein(candidate, input), *candidate))
            .min_by_key(|(distance, _)| *distance);
        if let Some((distance, candidate)) = best {
            if distance <= 2 {
                output::info(format!("Suggestion: `{}`?", candidate));
            }
        }
    }
}

fn joined(args: &[&str], usage: &'static str) -> Result<String, CommandError> {
    let text = args.join(" ");
    if text.trim().is_empty() {
        Err(CommandError::Usage(usage))
    } else {
        Ok(text)
    }
}

fn short_id(id: Uuid) -> String {
    id.to_string().chars().take(8).collect()
}
