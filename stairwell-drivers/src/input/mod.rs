//! Switch sensor input

pub mod debounced;

pub use debounced::{
    DebouncedInput, MonitorError, MonitorState, TransitionListener, MAX_LISTENERS,
    TRANSITION_QUEUE_SIZE,
};
