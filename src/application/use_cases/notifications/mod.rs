pub mod send_password_reset;
