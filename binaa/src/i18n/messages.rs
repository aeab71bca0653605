use super::Locale;

/// User-facing outcome of an action, rendered in the request's locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    LoginSuccess,
    AccountNotFound,
    WrongPassword,
    LoginFailed,
    LogoutSuccess,
    LogoutFailed,
    OperationFailed,
    InvalidInput,
    Unauthorized,
    Forbidden,
    NotFound,
    PasswordMismatch,
    EmailTaken,
    UserCreated,
    UserCreateFailed,
    UserUpdated,
    UserUpdateFailed,
    UserDeleted,
    UserDeleteFailed,
    ProjectCreated,
    ProjectCreateFailed,
    ProjectUpdated,
    ProjectUpdateFailed,
    ProjectDeleted,
    ProjectDeleteFailed,
    ContactReceived,
    QuoteReceived,
}

impl Message {
    pub fn text(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::Ar => self.ar(),
            Locale::En => self.en(),
        }
    }

    fn ar(&self) -> &'static str {
        match self {
            Message::LoginSuccess => "تم تسجيل الدخول بنجاح.",
            Message::AccountNotFound => "لم يتم العثور على حساب بهذا البريد الإلكتروني.",
            Message::WrongPassword => "كلمة المرور غير صحيحة. الرجاء المحاولة مرة أخرى.",
            Message::LoginFailed => "حدث خطأ أثناء تسجيل الدخول. يرجى المحاولة لاحقاً.",
            Message::LogoutSuccess => "تم تسجيل الخروج بنجاح",
            Message::LogoutFailed => "حدث خطأ أثناء تسجيل الخروج",
            Message::OperationFailed => "فشلت العملية، يرجى المحاولة لاحقاً",
            Message::InvalidInput => "البيانات المدخلة غير صالحة",
            Message::Unauthorized => "يجب تسجيل الدخول أولاً",
            Message::Forbidden => "ليس لديك صلاحية للقيام بهذا الإجراء",
            Message::NotFound => "العنصر المطلوب غير موجود",
            Message::PasswordMismatch => "كلمات المرور غير متطابقة",
            Message::EmailTaken => "البريد الإلكتروني مستخدم بالفعل",
            Message::UserCreated => "تم انشاء المستخدم بنجاح",
            Message::UserCreateFailed => "فشل انشاء المستخدم",
            Message::UserUpdated => "تم تحديث المستخدم بنجاح",
            Message::UserUpdateFailed => "فشل تحديث المستخدم",
            Message::UserDeleted => "تم حذف المستخدم بنجاح",
            Message::UserDeleteFailed => "فشل حذف المستخدم",
            Message::ProjectCreated => "تم انشاء المشروع بنجاح",
            Message::ProjectCreateFailed => "فشل انشاء المشروع",
            Message::ProjectUpdated => "تم تحديث المشروع بنجاح",
            Message::ProjectUpdateFailed => "فشل تحديث المشروع",
            Message::ProjectDeleted => "تم حذف المشروع بنجاح",
            Message::ProjectDeleteFailed => "فشل حذف المشروع",
            Message::ContactReceived => "تم إرسال رسالتك بنجاح",
            Message::QuoteReceived => "تم إرسال طلب عرض السعر بنجاح",
        }
    }

    fn en(&self) -> &'static str {
        match self {
            Message::LoginSuccess => "Signed in successfully.",
            Message::AccountNotFound => "No account was found with this email.",
            Message::WrongPassword => "Incorrect password. Please try again.",
            Message::LoginFailed => "An error occurred while signing in. Please try again later.",
            Message::LogoutSuccess => "Signed out successfully",
            Message::LogoutFailed => "An error occurred while signing out",
            Message::OperationFailed => "The operation failed, please try again later",
            Message::InvalidInput => "The submitted data is invalid",
            Message::Unauthorized => "You need to sign in first",
            Message::Forbidden => "You are not allowed to perform this action",
            Message::NotFound => "The requested item was not found",
            Message::PasswordMismatch => "Passwords do not match",
            Message::EmailTaken => "This email is already in use",
            Message::UserCreated => "User created successfully",
            Message::UserCreateFailed => "Failed to create user",
            Message::UserUpdated => "User updated successfully",
            Message::UserUpdateFailed => "Failed to update user",
            Message::UserDeleted => "User deleted successfully",
            Message::UserDeleteFailed => "Failed to delete user",
            Message::ProjectCreated => "Project created successfully",
            Message::ProjectCreateFailed => "Failed to create project",
            Message::ProjectUpdated => "Project updated successfully",
            Message::ProjectUpdateFailed => "Failed to update project",
            Message::ProjectDeleted => "Project deleted successfully",
            Message::ProjectDeleteFailed => "Failed to delete project",
            Message::ContactReceived => "Your message has been sent",
            Message::QuoteReceived => "Your quote request has been sent",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_messages_match_product_wording() {
        assert_eq!(Message::LoginSuccess.text(Locale::Ar), "تم تسجيل الدخول بنجاح.");
        assert_eq!(
            Message::AccountNotFound.text(Locale::Ar),
            "لم يتم العثور على حساب بهذا البريد الإلكتروني."
        );
        assert_eq!(Message::LoginSuccess.text(Locale::En), "Signed in successfully.");
    }

    #[test]
    fn test_locales_differ() {
        for message in [
            Message::LogoutSuccess,
            Message::OperationFailed,
            Message::ProjectUpdated,
            Message::PasswordMismatch,
        ] {
            assert_ne!(message.text(Locale::Ar), message.text(Locale::En));
        }
    }
}
