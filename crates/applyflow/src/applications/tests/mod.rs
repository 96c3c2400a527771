mod common;
mod outcome;
