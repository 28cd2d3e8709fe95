use crate::error::{AppError, AppResult};
use crate::services::accounts::{loose_eq, read_staff, read_students};
use crate::state::AppContext;
use common::model::account::{Identity, LecturerIdentity, StudentIdentity};
use common::requests::LoginRequest;
use log::info;

/// Handles the `login` action.
pub fn process(ctx: &AppContext, req: LoginRequest) -> AppResult<Identity> {
    let identity = resolve_identity(ctx, &req.identifier, &req.password)?;
    info!(
        "login resolved {} as {}",
        identity.username(),
        identity.role().as_str()
    );
    Ok(identity)
}

/// Finds the account whose identifier and password both match.
///
/// # Returns
/// - `Identity::Student` for the first matching student row.
/// - Otherwise `Identity::Lecturer` for the first matching staff row.
/// - `AppError::Authentication` when neither table matches.
pub fn resolve_identity(ctx: &AppContext, identifier: &str, password: &str) -> AppResult<Identity> {
    let student = read_students(ctx)?.into_iter().map(|(_, s)| s).find(|s| {
        (loose_eq(&s.email, identifier)
            || loose_eq(&s.username, identifier)
            || loose_eq(&s.phone, identifier))
            && credential_matches(&s.password, password)
    });
    if let Some(s) = student {
        return Ok(Identity::Student(StudentIdentity::from(&s)));
    }

    let lecturer = read_staff(ctx)?.into_iter().map(|(_, l)| l).find(|l| {
        (loose_eq(&l.username, identifier) || loose_eq(&l.email, identifier))
            && credential_matches(&l.password, password)
    });
    if let Some(l) = lecturer {
        return Ok(Identity::Lecturer(LecturerIdentity::from(&l)));
    }

    Err(AppError::Authentication)
}

/// Compares a stored credential with the supplied one.
///
/// Accounts are provisioned with plaintext passwords, so this is a direct
/// comparison. Hashing at rest would change only this function and the
/// password write in the profile update.
fn credential_matches(stored: &str, supplied: &str) -> bool {
    !supplied.is_empty() && stored == supplied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::memory::{lecturer, student, Fixture, AYU_BOOK, BAYU_BOOK};

    fn fixture() -> Fixture {
        Fixture::new(
            &[
                student("1", "2141720001", "Ayu", AYU_BOOK, "Jl. Raya No. 5"),
                student("2", "2141720002", "Bayu", BAYU_BOOK, "Jl. Ijen 10"),
            ],
            &[lecturer("9", "198001012005", "budi@staff.test", "dosen-pw")],
        )
    }

    #[test]
    fn student_logs_in_with_username_email_or_phone() {
        let fx = fixture();
        for identifier in ["2141720002", "2141720002@student.test", "08122"] {
            match resolve_identity(&fx.ctx, identifier, "pw-2141720002").unwrap() {
                Identity::Student(s) => {
                    assert_eq!(s.id, "2");
                    assert_eq!(s.name, "Bayu");
                    assert_eq!(s.internship_addr, "Jl. Ijen 10");
                }
                other => panic!("expected student, got {:?}", other),
            }
        }
    }

    #[test]
    fn lecturer_logs_in_with_username_or_email() {
        let fx = fixture();
        for identifier in ["198001012005", "budi@staff.test"] {
            let identity = resolve_identity(&fx.ctx, identifier, "dosen-pw").unwrap();
            assert_eq!(identity.role().as_str(), "lecturer");
            assert_eq!(identity.id(), "9");
        }
    }

    #[test]
    fn lecturer_phone_is_not_an_identifier() {
        let fx = fixture();
        assert!(matches!(
            resolve_identity(&fx.ctx, "08111", "dosen-pw"),
            Err(AppError::Authentication)
        ));
    }

    #[test]
    fn wrong_password_fails_for_both_roles() {
        let fx = fixture();
        assert!(matches!(
            resolve_identity(&fx.ctx, "2141720001", "pw-2141720002"),
            Err(AppError::Authentication)
        ));
        assert!(matches!(
            resolve_identity(&fx.ctx, "budi@staff.test", "wrong"),
            Err(AppError::Authentication)
        ));
        assert!(matches!(
            resolve_identity(&fx.ctx, "2141720001", ""),
            Err(AppError::Authentication)
        ));
    }

    #[test]
    fn students_are_checked_before_staff() {
        let shared = "shared@campus.test";
        let mut s = student("1", "2141720001", "Ayu", AYU_BOOK, "");
        s.email = shared.into();
        s.password = "student-pw".into();
        let fx = Fixture::new(&[s], &[lecturer("9", "198001", shared, "staff-pw")]);

        let identity = resolve_identity(&fx.ctx, shared, "student-pw").unwrap();
        assert!(matches!(identity, Identity::Student(_)));

        let fx = Fixture::new(
            &[{
                let mut s = student("1", "2141720001", "Ayu", AYU_BOOK, "");
                s.email = shared.into();
                s
            }],
            &[lecturer("9", "198001", shared, "staff-pw")],
        );
        let identity = resolve_identity(&fx.ctx, shared, "staff-pw").unwrap();
        assert!(matches!(identity, Identity::Lecturer(_)));
    }

    #[test]
    fn first_matching_row_wins() {
        let mut a = student("1", "2141720001", "Ayu", AYU_BOOK, "");
        let mut b = student("2", "2141720002", "Bayu", BAYU_BOOK, "");
        a.phone = "0811".into();
        b.phone = "0811".into();
        b.password = a.password.clone();
        let fx = Fixture::new(&[a, b], &[]);
        assert_eq!(
            resolve_identity(&fx.ctx, "0811", "pw-2141720001").unwrap().id(),
            "1"
        );
    }
}
