pub mod db;
pub mod localization;
