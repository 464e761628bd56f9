//! HTTP layer of the BizReg backend: routes, the access gate, DTOs and the
//! mapping of domain errors onto the response envelope.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;
