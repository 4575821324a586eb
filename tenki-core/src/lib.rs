//! Observable state primitives and event plumbing for tenki
//!
//! This crate provides the reactive backbone the screens are built on:
//!
//! - **StateStream**: push-based observable that retains its latest value and
//!   replays it to every new subscriber
//! - **EventStream**: fire-and-forget multicast emitter with no retained value
//! - **Subscription / SubscriptionSet**: scoped teardown of subscribers
//! - **UiHandle**: the one way emissions cross onto the UI loop before they
//!   touch render state
//! - **Component**: pure UI elements that render based on props
//!
//! # Basic Example
//!
//! ```ignore
//! use tenki_core::{StateStream, UiHandle};
//!
//! enum Msg {
//!     Loading(bool),
//! }
//!
//! let loading = StateStream::new(false);
//! let ui = UiHandle::from_sender(msg_tx);
//!
//! // Delivered on the UI loop, starting with the current value.
//! let sub = loading.observe_on(&ui, |v| Msg::Loading(*v));
//!
//! // From any thread:
//! loading.publish(true);
//!
//! drop(sub); // no callback fires after this point
//! ```

pub mod component;
pub mod event;
pub mod stream;
pub mod subscription;
pub mod testing;
pub mod ui;

pub use component::Component;
pub use event::{spawn_event_poller, EventKind};
pub use stream::{EventStream, StateStream};
pub use subscription::{Subscription, SubscriptionSet};
pub use ui::UiHandle;

// Re-export ratatui types for convenience
pub use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    Frame,
};

// Testing exports
pub use testing::{
    buffer_to_string_plain, char_key, ctrl_key, key, ActionAssertions, RenderHarness,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::component::Component;
    pub use crate::event::{spawn_event_poller, EventKind};
    pub use crate::stream::{EventStream, StateStream};
    pub use crate::subscription::{Subscription, SubscriptionSet};
    pub use crate::ui::UiHandle;

    // Re-export ratatui types
    pub use ratatui::{
        layout::Rect,
        style::{Color, Modifier, Style},
        text::{Line, Span, Text},
        Frame,
    };
}
