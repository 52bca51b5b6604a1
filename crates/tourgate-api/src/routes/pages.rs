//! HTML pages and static assets served from disk

use std::path::Path;

use axum::Router;
use tower_http::services::{ServeDir, ServeFile};

use crate::state::AppState;

/// Page routes and the HTML file each one serves
const PAGES: &[(&str, &str)] = &[
    ("/", "index.html"),
    ("/signin", "login.html"),
    ("/signup", "auth.html"),
    ("/turs", "population-turs.html"),
];

/// Create page routes rooted at `ui_dir`
pub fn routes(ui_dir: &Path) -> Router<AppState> {
    let router = PAGES.iter().fold(Router::new(), |router, (route, file)| {
        router.route_service(route, ServeFile::new(ui_dir.join(file)))
    });

    router.nest_service("/static", ServeDir::new(ui_dir.join("static")))
}
