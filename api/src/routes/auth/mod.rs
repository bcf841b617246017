//! Authentication routes under `/api/v1/auth`.

pub mod change_password;
pub mod forgot_password;
pub mod login;
pub mod logout;
pub mod register;
pub mod resend_otp;
pub mod reset_password;
pub mod verify_otp;
