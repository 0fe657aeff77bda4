mod guard;
mod helpers;
mod toml;
