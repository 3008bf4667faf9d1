//! # TFC Proxy Core
//!
//! Core logic for relaying Terraform Cloud run notifications to a Discord
//! webhook.
//!
//! A request flows through three stages, stopping at the first failure:
//!
//! 1. [`authenticator`]: optional HMAC-SHA512 check of the raw body.
//! 2. [`translator`]: decode, validate and turn the first notification into a
//!    single Discord embed.
//! 3. [`dispatcher`]: `POST` the encoded message to the destination webhook.
//!
//! The first two stages are pure functions. The dispatcher performs exactly
//! one HTTP call per request. [`relay::NotificationRelay`] chains the three.
//!
//! ## Usage
//!
//! ```rust
//! use tfc_proxy_core::{authenticator, translator};
//!
//! let body = br#"{"notifications":[{"message":"Verification","trigger":"verification"}]}"#;
//!
//! authenticator::verify(body, None, None).unwrap();
//! let payload = translator::parse_payload(body).unwrap();
//! let message = translator::translate(&payload).unwrap();
//! assert!(message.embeds[0].fields.is_empty());
//! ```

pub mod authenticator;
pub mod dispatcher;
pub mod error;
pub mod message;
pub mod payload;
pub mod relay;
pub mod translator;

pub use authenticator::{Authenticator, SIGNATURE_HEADER};
pub use dispatcher::{HttpDispatcher, MessageDispatcher};
pub use error::{AuthError, DeliveryError, ProxyError, ProxyResult, ValidationError};
pub use message::{status_color, Embed, EmbedColor, Field, OutboundMessage};
pub use payload::{InboundPayload, NotificationEvent, VERIFICATION_TRIGGER};
pub use relay::{NotificationRelay, RelayOutcome};
