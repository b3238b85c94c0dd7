pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod guards;
pub mod state;
pub mod telemetry;

pub mod crypto {
    pub mod csrf;
    pub mod password;
}

pub mod models {
    pub mod account;
    pub mod category;
    pub mod contact;
    pub mod email_log;
    pub mod note;
    pub mod notification;
    pub mod project;
    pub mod resource;
    pub mod session;
    pub mod user;
}

pub mod repositories {
    pub mod category;
    pub mod email_log;
    pub mod memory;
    pub mod notification;
    pub mod postgres;
    pub mod resource;
    pub mod session;
    pub mod store;
    pub mod user;
}

pub mod services {
    pub mod admin;
    pub mod auth;
    pub mod categories;
    pub mod dashboard;
    pub mod email_logs;
    pub mod notifications;
    pub mod resources;
    pub mod tracking;
    pub mod user_agent;
}

pub mod handlers {
    pub mod admin;
    pub mod auth;
    pub mod categories;
    pub mod email_logs;
    pub mod notifications;
    pub mod pages;
    pub mod resources;
    pub mod response;
    pub mod tracking;
}

pub mod middleware_layer {
    pub mod auth;
    pub mod csrf;
}

pub mod validation {
    pub mod input;
}
