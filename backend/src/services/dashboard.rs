//! `getDashboardData`: echoes the caller back. Dashboard figures are
//! computed client-side from `getAllLogbooks`.

use common::requests::DashboardRequest;
use serde_json::{json, Value};

pub fn process(req: DashboardRequest) -> Value {
    json!({
        "message": "Data fetched",
        "userId": req.user_id,
        "role": req.role,
    })
}
