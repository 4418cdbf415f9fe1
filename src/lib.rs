pub use ardea_core::*;

#[cfg(feature = "client")]
pub mod client {
    pub use ardea_client::*;
}

#[cfg(feature = "webhook")]
pub mod webhook {
    pub use ardea_webhook::*;
}

pub mod prelude {
    pub use ardea_core::prelude::*;

    #[cfg(feature = "client")]
    pub use ardea_client::AssetsClient;

    #[cfg(feature = "webhook")]
    pub use ardea_webhook::{WebhookHandler, WebhookServer};
}
