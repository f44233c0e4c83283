mod config;
mod palette;
