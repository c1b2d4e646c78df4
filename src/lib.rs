// Library root
// -----------
// The binary (`main.rs`) wires these modules into the interactive console.
//
// Module responsibilities:
// - `api`: the `MastodonApi` capability and its blocking HTTP client.
// - `model`: statuses, accounts and notifications as sent by the instance.
// - `config`: configuration directory and the files persisted in it.
// - `session`: app registration and login before the console starts.
// - `registry`: command table and the handler signature.
// - `commands`: the built-in commands.
// - `repl`: the read/dispatch loop.
// - `render`: markup stripping and display lines for remote entities.
// - `ui`: terminal input, password prompt and spinner.
pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod registry;
pub mod render;
pub mod repl;
pub mod session;
pub mod ui;
