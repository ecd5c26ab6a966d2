//! `@param` duplicate, anchoring, nesting, and ordering enforcement.

use crate::{iterate::DocContext, reconcile, report::Reporter};

pub fn run(context: &DocContext<'_>, reporter: &mut dyn Reporter) {
    if context.function_node().is_none() {
        return;
    }
    reconcile::check_param_names(
        context.params(),
        &context.block,
        context.settings,
        context.comment_line,
        reporter,
    );
}
