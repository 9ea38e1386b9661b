pub mod relationship;
