//! Steps command implementation.
//!
//! The `rigup steps` command shows what a run would do without touching the
//! external system. Parameters are substituted; captured facts are not known
//! yet and stay as `${name}`.

use crate::cli::args::RunArgs;
use crate::config::interpolation::{resolve_string_lenient, InterpolationContext};
use crate::config::load_plan;
use crate::error::{RigupError, Result};
use crate::ui::theme::RigupTheme;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The steps command implementation.
pub struct StepsCommand {
    args: RunArgs,
}

impl StepsCommand {
    /// Create a new steps command.
    pub fn new(args: RunArgs) -> Self {
        Self { args }
    }
}

impl Command for StepsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let params = match self.args.parameters() {
            Ok(p) => p,
            Err(e) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(1));
            }
        };

        let plan = match load_plan(self.args.plan.as_deref()) {
            Ok(p) => p,
            Err(e @ RigupError::ConfigNotFound { .. })
            | Err(e @ RigupError::ConfigParseError { .. })
            | Err(e @ RigupError::ConfigValidationError { .. }) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(1));
            }
            Err(e) => return Err(e),
        };

        let theme = RigupTheme::detect();
        let ctx = InterpolationContext::new().with_params(params.as_variables());
        let show_commands = ui.output_mode().shows_details();

        ui.show_header(plan.title());
        ui.message(&format!(
            "  {}",
            theme.key.apply_to(format!("Steps ({}):", plan.steps.len()))
        ));
        for (i, step) in plan.steps.iter().enumerate() {
            ui.message(&format!(
                "    {} {}",
                theme.dim.apply_to(format!("{:>2}.", i + 1)),
                theme.highlight.apply_to(&step.name)
            ));
            if show_commands {
                for command in &step.commands {
                    ui.message(&format!(
                        "        {}",
                        theme.command.apply_to(resolve_string_lenient(command, &ctx))
                    ));
                }
            }
            for capture in &step.captures {
                ui.message(&format!(
                    "        {} {}",
                    theme.dim.apply_to("└── captures"),
                    theme.dim.apply_to(&capture.name)
                ));
            }
        }

        if !plan.facts.is_empty() {
            ui.message("");
            ui.message(&format!(
                "  {}",
                theme.key.apply_to(format!("Facts ({}):", plan.facts.len()))
            ));
            for fact in &plan.facts {
                ui.message(&format!("    {}", fact.label));
            }
        }

        if !plan.checks.is_empty() {
            ui.message("");
            ui.message(&format!(
                "  {}",
                theme.key.apply_to(format!("Checks ({}):", plan.checks.len()))
            ));
            for check in &plan.checks {
                ui.message(&format!("    {}", check.title));
            }
        }

        Ok(CommandResult::success())
    }
}
