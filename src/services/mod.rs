pub mod diary;
pub mod directory;
pub mod reports;
