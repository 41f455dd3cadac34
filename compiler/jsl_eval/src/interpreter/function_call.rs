//! Calling JSL-defined functions.

use super::{CallMode, Machine};
use crate::context::Context;
use crate::environment::Environment;
use crate::errors::{EvalResult, Unwind};
use crate::stack::EvalStack;
use crate::value::{JslFunc, Value};

impl Machine {
    /// Call `func` with arguments popped from `stack`.
    ///
    /// The first value popped (the one pushed last) becomes `$1`. The body
    /// runs against a copy of the caller's environment, so its bindings,
    /// including the `$N` arguments, never leak back to the caller. `ctx` is
    /// the calling token's frame and becomes the parent of every error raised
    /// inside the body.
    #[tracing::instrument(level = "debug", skip_all, fields(function = %func.name, depth = self.depth))]
    pub(crate) fn call_function(
        &mut self,
        func: &JslFunc,
        stack: &mut EvalStack,
        env: &Environment,
        ctx: &Context,
    ) -> EvalResult<Option<Value>> {
        let mut args = Vec::with_capacity(func.arity);
        for _ in 0..func.arity {
            let arg = stack
                .pop()
                .map_err(|kind| Unwind::error(kind, ctx.clone()))?;
            args.push(arg);
        }

        let mut call_env = env.clone();
        call_env.bind_arguments(args);
        let parent = ctx.snapshot();
        self.enter(|machine| {
            machine.run_block(
                &func.body[..],
                &mut call_env,
                Some(parent),
                CallMode::FunctionBody,
                func.first_line,
                func.origin,
            )
        })
    }
}
