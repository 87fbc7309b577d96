pub mod user;
pub mod gym;
pub mod kode_gym;
pub mod franchise;
pub mod makanan;
pub mod history;
pub mod token;

pub use user::User;
pub use gym::Gym;
pub use kode_gym::KodeGym;
pub use franchise::Franchise;
pub use makanan::Makanan;
pub use history::History;
pub use token::Token;
