use derive_more::Display;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
#[repr(i16)]
pub enum UserRole {
    #[display("student")]
    Student = 1,
    #[display("teacher")]
    Teacher = 2,
}

impl UserRole {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            UserRole::Student => "student",
            UserRole::Teacher => "teacher",
        }
    }

    /// `None` for anything other than 1 (student) or 2 (teacher)
    #[inline]
    pub const fn try_from_id(id: i16) -> Option<Self> {
        match id {
            1 => Some(UserRole::Student),
            2 => Some(UserRole::Teacher),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_try_from_id() {
        assert_eq!(UserRole::try_from_id(1), Some(UserRole::Student));
        assert_eq!(UserRole::try_from_id(2), Some(UserRole::Teacher));
        assert_eq!(UserRole::try_from_id(0), None);
        assert_eq!(UserRole::try_from_id(3), None);
        assert_eq!(UserRole::try_from_id(-1), None);
    }

    #[test]
    fn test_user_role_id_roundtrip() {
        for role in [UserRole::Student, UserRole::Teacher] {
            assert_eq!(UserRole::try_from_id(role.id()), Some(role));
        }
    }

    #[test]
    fn test_user_role_display() {
        assert_eq!(UserRole::Student.to_string(), "student");
        assert_eq!(UserRole::Teacher.to_string(), "teacher");
    }
}
