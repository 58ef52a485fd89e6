//! Operation lifecycle macros
//!
//! Every pipeline operation logs one `start` event and then exactly one of
//! `end` or `end_error`, all tagged with `component` (the calling module)
//! and `op`. Extra `key = value` fields pass straight through to `tracing`.

#[doc(hidden)]
#[macro_export]
macro_rules! __log_op_event {
    ($level:ident, $op:expr, $event:ident, $($field:tt)*) => {
        tracing::$level!(
            component = module_path!(),
            op = $op,
            event = $crate::lavaflow_core_types::schema::$event,
            $($field)*
        )
    };
}

/// Log the start of an operation
///
/// ```
/// # use lavaflow_core::log_op_start;
/// log_op_start!("compute_diffs");
/// log_op_start!("compute_diffs", snapshots = 3);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__log_op_event!(info, $op, EVENT_START, $($($field)*)?);
    };
}

/// Log the successful end of an operation with its duration
///
/// ```
/// # use lavaflow_core::log_op_end;
/// log_op_end!("upload", duration_ms = 42, indexed = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__log_op_event!(
            info,
            $op,
            EVENT_END,
            duration_ms = $duration,
            $($($field)*)?
        );
    };
}

/// Log an operation that ended in error, with the error's kind and code
///
/// `$err` is anything convertible into [`ExError`](crate::errors::ExError).
///
/// ```
/// # use lavaflow_core::log_op_error;
/// # use lavaflow_core::errors::{ExError, ExErrorKind};
/// let err = ExError::new(ExErrorKind::Persistence);
/// log_op_error!("upload", err, duration_ms = 10, snapshot_id = "s1");
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::__log_op_event!(
            error,
            $op,
            EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            $($($field)*)?
        );
    }};
}
