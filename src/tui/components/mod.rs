//! # TUI Components
//!
//! Presentational building blocks for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as fields:
//! - `TitleBar`: top status bar with room id and status
//! - `Invitation`: the shareable link of the active room
//! - `Message`: one chat message
//! - `LandingPage`: shown while no room is active
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that own local state and emit events:
//! - `Form`: text field with placeholder, emits `FormEvent::Submit`
//! - `MessageThread`: scrollable scrollback with layout caching
//!
//! ### Props-Based Data Flow
//!
//! Components never reach into `App`. The room view (`tui::chat`) reads the
//! `DomainContext` and hands each component exactly what it renders.
//!
//! ```text
//! components/
//! ├── mod.rs             (this file)
//! ├── title_bar.rs
//! ├── invitation.rs
//! ├── message.rs         (single message renderer)
//! ├── message_thread.rs  (scrollable message container)
//! ├── landing.rs
//! └── form/              (text field + row layout helpers)
//! ```

pub mod form;
pub mod invitation;
pub mod landing;
pub mod message;
pub mod message_thread;
mod title_bar;

pub use form::{Form, FormEvent};
pub use invitation::Invitation;
pub use landing::LandingPage;
pub use message_thread::{MessageThread, MessageThreadState};
pub use title_bar::TitleBar;
