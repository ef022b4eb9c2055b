pub mod login;
pub mod password_reset;
pub mod signup;
pub mod verification;

pub use login::LoginService;
pub use password_reset::PasswordResetService;
pub use signup::SignupService;
pub use verification::VerificationService;
