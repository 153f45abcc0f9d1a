//! Core line handling for G
//!
//! A line goes through four pure stages: [`token::tokenize`],
//! [`operator::resolve`], [`operands::partition`] and [`dispatch::dispatch`].
//! Nothing here runs git or touches the settings file on disk.

pub mod dispatch;
pub mod operands;
pub mod operator;
pub mod settings;
pub mod token;

pub use dispatch::{dispatch, DispatchError, GitInvocation, GitSubcommand, Invocation};
pub use operands::{partition, OperandSet};
pub use operator::{resolve, Operator};
pub use settings::{Settings, SettingsError, SettingsStore, YamlSettingsStore};
pub use token::{tokenize, Token, TokenKind};
