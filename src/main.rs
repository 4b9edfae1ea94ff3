//! worklog main entrypoint.

use worklog::run;
use worklog::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        if e.is_storage() {
            error(format!("Storage unavailable: {}", e));
        } else {
            error(e);
        }
        std::process::exit(1);
    }
}
