pub mod cli;
pub mod form;
pub mod levels;
pub mod normalization;
pub mod report;
pub mod store;
pub mod trace;

pub mod util {
    pub mod env;
}
