mod capture_handlers;
mod save_handlers;
