//! Command lifecycle events
//!
//! A snippet command logs one `start` event when it is entered and then either
//! one `end` or one `end_error` event. The shared fields (`component`, `op`,
//! `event`) are filled in here; call sites add only what is specific to the
//! command, as plain `tracing` fields.

#[doc(hidden)]
#[macro_export]
macro_rules! __snipx_op_event {
    ($level:ident, $event:expr, $op:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = module_path!(),
            op = $op,
            event = $event,
            $($($field)*)?
        )
    };
}

/// Record that a command was entered
///
/// ```
/// # use snipx_core::log_op_start;
/// log_op_start!("lexer_list");
/// log_op_start!("snippet_tree", short_code = "Qx7p");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__snipx_op_event!(
            info,
            $crate::core_types::schema::EVENT_START,
            $op
            $(, $($field)*)?
        )
    };
}

/// Record that a command finished; `duration_ms` is mandatory
///
/// ```
/// # use snipx_core::log_op_end;
/// log_op_end!("snippet_diff", duration_ms = 12, changed = true);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__snipx_op_event!(
            info,
            $crate::core_types::schema::EVENT_END,
            $op,
            duration_ms = $duration
            $(, $($field)*)?
        )
    };
}

/// Record that a command failed
///
/// The error goes through [`ExError`](crate::errors::ExError), so its stable
/// code and any short code it carries end up on the event.
///
/// ```
/// # use snipx_core::log_op_error;
/// # use snipx_core::errors::{ExError, ExErrorKind};
/// let err = ExError::new(ExErrorKind::NotFound).with_short_code("Qx7p");
/// log_op_error!("snippet_raw", err, duration_ms = 0);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let failure: $crate::errors::ExError = $err.into();
        $crate::__snipx_op_event!(
            error,
            $crate::core_types::schema::EVENT_END_ERROR,
            $op,
            duration_ms = $duration,
            err.kind = ?failure.kind(),
            err.code = failure.code(),
            err.short_code = failure.short_code()
            $(, $($field)*)?
        )
    }};
}
