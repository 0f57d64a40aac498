pub mod health_handler;
pub mod quiz_handler;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    health_handler::configure(cfg);
    quiz_handler::configure(cfg);
}
