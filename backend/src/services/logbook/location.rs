use common::model::attendance::AttendanceStatus;

/// Whether a check-in's reported address is plausible for the placement.
///
/// Only `Present` check-ins are scrutinised; any other status is valid. A
/// present check-in is valid when, after trimming and lowercasing, either
/// address contains the other. There is no token or fuzzy matching, and an
/// empty address is contained in every string.
pub fn is_location_valid(status: &str, address: &str, target_address: &str) -> bool {
    if !AttendanceStatus::is_present_cell(status) {
        return true;
    }
    let address = address.trim().to_lowercase();
    let target = target_address.trim().to_lowercase();
    address.contains(&target) || target.contains(&address)
}
