//! Small response bodies shared by the routes.

use serde::Serialize;

/// `{ "ok": true }`, returned by a successful update.
#[derive(Serialize)]
pub struct Ack {
    pub ok: bool,
}

impl Ack {
    pub fn ok() -> Self {
        Ack { ok: true }
    }
}

#[derive(Serialize)]
pub struct HealthBody {
    pub status: &'static str,
    pub ts: String,
}

#[derive(Serialize)]
pub struct ReadyBody {
    pub status: &'static str,
    pub database: &'static str,
}

/// Service metadata served at `/`.
#[derive(Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub health: &'static str,
    pub productos: &'static str,
}
