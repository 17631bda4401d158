//! ferry-core
//!
//! Control plane for running one unit of work on a remote interpreter
//! session: locate build artifacts, push them to the remote side, install
//! them in order, refresh the interpreter when the runtime supports it,
//! resolve artifact references in task parameters, and dispatch the task.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（artifact, task, ids, runtime_version, errors）
//! - **ports**: 抽象化レイヤー（RemoteExecutionClient, TransferStrategy,
//!   ParameterResolver, RunStore, Clock, IdGenerator）
//! - **app**: アプリケーションロジック（ExecutionController, ArtifactLocator,
//!   RuntimeProbe）
//! - **impls**: 実装（ContextTransfer, StoreTransfer, InMemoryRunStore,
//!   FileReferenceResolver）
//!
//! The controller is the only component with cross-cutting knowledge of
//! phase ordering and failure policy; everything else is a leaf.

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;
