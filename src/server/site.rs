// Which application a listener serves

use std::sync::Arc;

use hyper::Request;

use crate::dashboard::Dashboard;
use crate::http::HttpResponse;
use crate::status;

#[derive(Clone)]
pub enum Site {
    /// The JSON status endpoint
    Status,
    /// The dashboard page, shared across connections
    Dashboard(Arc<Dashboard>),
}

impl Site {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Dashboard(_) => "dashboard",
        }
    }

    pub async fn respond(&self, req: &Request<()>) -> HttpResponse {
        match self {
            Self::Status => status::handle(req),
            Self::Dashboard(dashboard) => dashboard.handle(req).await,
        }
    }
}
