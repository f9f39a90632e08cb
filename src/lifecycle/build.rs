//! Build phase: configure then build.

use crate::context::RecipeContext;
use crate::core::output;
use crate::executor::{BuildTool, ExecuteError};

/// Cache variables passed to the configure step: the resolved version first,
/// then one switch per catalog component.
pub fn configure_variables(ctx: &RecipeContext) -> Vec<(String, String)> {
    let mut vars = vec![(
        ctx.recipe.version_variable.to_string(),
        ctx.version().to_string(),
    )];
    vars.extend(ctx.features.cmake_switches("boost"));
    vars
}

pub fn build(ctx: &RecipeContext, tool: &mut dyn BuildTool) -> Result<(), ExecuteError> {
    output::sub_action("configure");
    tool.configure(&configure_variables(ctx))?;

    output::sub_action("build");
    tool.build()
}
