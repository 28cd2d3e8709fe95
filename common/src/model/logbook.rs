use serde::{Deserialize, Serialize};

/// One daily check-in, as stored in a student's Logbook table.
///
/// `activity` and `output` hold the flat form produced by
/// [`rich_text::encode`](crate::model::rich_text::encode).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogbookEntry {
    pub timestamp: String,
    pub full_name: String,
    pub class_name: String,
    pub username: String,
    pub date: String,
    pub time: String,
    pub attendance_status: String,
    pub coordinates: Coordinates,
    pub accuracy_meters: String,
    pub address: String,
    pub selfie_photo_url: String,
    pub activity_description: String,
    pub output_description: String,
    pub document_url: String,
}

/// A latitude/longitude pair, stored in one cell as `"lat,lng"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Coordinates { lat, lng }
    }

    /// Cell form of the pair.
    pub fn to_cell(&self) -> String {
        format!("{},{}", self.lat, self.lng)
    }

    /// Reads a stored cell; each half that does not parse becomes `0.0`.
    pub fn from_cell(cell: &str) -> Self {
        let mut parts = cell.splitn(2, ',');
        let mut next = || {
            parts
                .next()
                .and_then(|p| p.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite())
                .unwrap_or(0.0)
        };
        let lat = next();
        let lng = next();
        Coordinates { lat, lng }
    }
}

/// A logbook row as served to supervising staff by `getAllLogbooks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogbookView {
    /// `<studentId>_<rowIndex>`, stable while the sheet is append-only.
    pub id: String,
    pub student_id: String,
    pub name: String,
    pub nim: String,
    pub class_name: String,
    pub timestamp: String,
    pub date: String,
    pub time: String,
    pub status: String,
    pub lat: f64,
    pub lng: f64,
    pub accuracy: String,
    pub address: String,
    pub selfie_url: String,
    pub activity: String,
    pub output: String,
    pub doc_url: String,
    pub is_location_valid: bool,
    pub target_address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_cell_round_trip() {
        let c = Coordinates::new(-7.9666, 112.6326);
        assert_eq!(c.to_cell(), "-7.9666,112.6326");
        assert_eq!(Coordinates::from_cell(&c.to_cell()), c);
    }

    #[test]
    fn unparseable_coordinates_fall_back_to_zero() {
        assert_eq!(Coordinates::from_cell("abc"), Coordinates::new(0.0, 0.0));
        assert_eq!(Coordinates::from_cell("-7.5, x"), Coordinates::new(-7.5, 0.0));
        assert_eq!(Coordinates::from_cell(""), Coordinates::default());
    }
}
