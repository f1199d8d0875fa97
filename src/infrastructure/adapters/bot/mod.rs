//! Bot Webhook Adapter

mod http_forwarder;

pub use http_forwarder::{HttpWebhookForwarder, HttpWebhookForwarderConfig};
