pub mod core {
    pub mod config;
    pub mod error;
    pub mod startup;
    pub mod state;
    pub mod tracing_init;
}

pub mod api {
    pub mod client;
}

pub mod models {
    pub mod credentials;
    pub mod session;
}

pub mod session {
    pub mod client;
}

pub mod stores {
    pub mod session_store;
}

pub mod utils {
    pub mod auth;
    pub mod time;
}

pub mod validation {
    pub mod availability;
    pub mod fields;
}

pub mod view {
    pub mod controller;
    pub mod events;
    pub mod page;
    pub mod surface;
    pub mod terminal;
}

pub mod wal {
    #[allow(clippy::module_inception)]
    pub mod wal;
}
