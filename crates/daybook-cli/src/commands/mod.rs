pub mod calendar;
pub mod cards;
pub mod dates;
pub mod entries;
pub mod init;
pub mod misc;
pub mod years;
