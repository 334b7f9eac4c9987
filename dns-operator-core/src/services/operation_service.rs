//! 批量记录操作服务

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use dns_operator_registry::log_sanitizer::describe_record;
use dns_operator_registry::{Registry, RegistryError};
use futures::future::join_all;
use tokio::sync::Mutex;

use crate::error::{CoreError, CoreResult, RegistryAction};
use crate::services::{RegistryResolver, RegistrySet, ServiceContext};
use crate::types::{BatchExecutionResult, BatchOperationFailure, Operation, OperationKind, RoleDef};
use crate::utils::name::normalize_name;

/// One operation bound to its live registry
struct Dispatch<'a> {
    index: usize,
    op: &'a Operation,
    registry_name: &'a str,
    registry: &'a Arc<dyn Registry>,
}

/// Validated operations grouped by kind, then by registry name
///
/// Input order is preserved within each group.
#[derive(Default)]
struct Partition<'a> {
    updated: BTreeMap<&'a str, Vec<Dispatch<'a>>>,
    deleted: BTreeMap<&'a str, Vec<Dispatch<'a>>>,
}

impl<'a> Partition<'a> {
    fn build(operations: &'a [Operation], registries: &'a RegistrySet) -> CoreResult<Self> {
        let mut partition = Self::default();
        for (index, op) in operations.iter().enumerate() {
            let registry_name = op.registry.as_deref().ok_or_else(|| {
                CoreError::ValidationError(format!("operation #{index} has no target registry"))
            })?;
            let registry = registries
                .get(registry_name)
                .ok_or_else(|| CoreError::RegistryNotFound(registry_name.to_string()))?;

            let group = match op.kind {
                OperationKind::Update => &mut partition.updated,
                OperationKind::Delete => &mut partition.deleted,
            };
            group.entry(registry_name).or_default().push(Dispatch {
                index,
                op,
                registry_name,
                registry,
            });
        }
        Ok(partition)
    }

    fn updates_in_input_order(&self) -> Vec<&Dispatch<'a>> {
        let mut updates: Vec<_> = self.updated.values().flatten().collect();
        updates.sort_by_key(|d| d.index);
        updates
    }

    fn mutations(&self) -> impl Iterator<Item = (RegistryAction, &Dispatch<'a>)> {
        self.updated
            .values()
            .flatten()
            .map(|d| (RegistryAction::Append, d))
            .chain(
                self.deleted
                    .values()
                    .flatten()
                    .map(|d| (RegistryAction::Delete, d)),
            )
    }
}

async fn dispatch(action: RegistryAction, target: &Dispatch<'_>) -> Result<(), RegistryError> {
    match action {
        RegistryAction::Append => target.registry.append_record(&target.op.record).await,
        RegistryAction::Delete => target.registry.delete_record(&target.op.record).await,
        RegistryAction::DeleteAll => {
            target
                .registry
                .delete_all_records_with_name(target.op.canonical_name())
                .await
        }
    }
}

/// Hand one outcome to the callback and turn a failure into its batch entry.
fn report<F>(
    callback: &F,
    target: &Dispatch<'_>,
    action: RegistryAction,
    result: Result<(), RegistryError>,
) -> Result<(), BatchOperationFailure>
where
    F: Fn(&Operation, Result<(), &CoreError>),
{
    let source = match result {
        Ok(()) => {
            log::debug!(
                "Registry [{}]: {action} {} succeeded",
                target.registry_name,
                describe_record(&target.op.record)
            );
            callback(target.op, Ok(()));
            return Ok(());
        }
        Err(source) => source,
    };

    let err = CoreError::RegistryOperation {
        registry: target.registry_name.to_string(),
        action,
        name: target.op.canonical_name().to_string(),
        source,
    };
    if err.is_expected() {
        log::warn!("Operation #{} failed: {err}", target.index);
    } else {
        log::error!("Operation #{} failed: {err}", target.index);
    }
    callback(target.op, Err(&err));

    Err(BatchOperationFailure {
        index: target.index,
        canonical_name: target.op.canonical_name().to_string(),
        registry: target.registry_name.to_string(),
        action,
        reason: err.to_string(),
    })
}

/// 批量记录操作服务
pub struct OperationService {
    ctx: Arc<ServiceContext>,
    resolver: RegistryResolver,
}

impl OperationService {
    /// 创建操作服务实例
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            resolver: RegistryResolver::new(Arc::clone(&ctx)),
            ctx,
        }
    }

    /// 授权并规范化单个操作
    ///
    /// On success the operation carries its target registry, ASCII
    /// `domain` / `subdomain`, and its canonical name on `record.name`.
    pub async fn validate_operation(&self, role: &RoleDef, op: &mut Operation) -> CoreResult<()> {
        let authorization = self
            .ctx
            .authorizer
            .authorize(role, &op.domain, &op.subdomain)
            .await?;
        op.registry = Some(authorization.registry);

        let normalized = normalize_name(&op.domain, &op.subdomain)?;
        op.domain = normalized.domain;
        op.subdomain = normalized.subdomain;
        op.record.name = normalized.canonical;
        Ok(())
    }

    /// 执行一批操作
    ///
    /// Every operation is validated and every target registry is built
    /// before anything is dispatched; the first failure there is returned
    /// and the callback never fires.
    ///
    /// Dispatch then runs in two concurrent phases:
    /// 1. For each canonical name touched by an update, the first update (in
    ///    batch order) deletes every existing record under that name. Only
    ///    failures are reported. The phase completes before the next starts.
    /// 2. Every update appends its record and every delete removes its
    ///    record. Each outcome is reported.
    ///
    /// Registry failures never abort the batch. All callbacks have fired by
    /// the time this returns.
    pub async fn execute_all<F>(
        &self,
        role: &RoleDef,
        operations: &mut [Operation],
        callback: F,
    ) -> CoreResult<BatchExecutionResult>
    where
        F: Fn(&Operation, Result<(), &CoreError>) + Sync,
    {
        for op in operations.iter_mut() {
            self.validate_operation(role, op).await?;
        }
        let operations: &[Operation] = operations;

        let registries = self
            .resolver
            .resolve(operations.iter().filter_map(|op| op.registry.as_deref()))
            .await?;

        let partition = Partition::build(operations, &registries)?;
        log::info!(
            "Executing {} operation(s) across {} registr(ies): {} update group(s), {} delete group(s)",
            operations.len(),
            registries.len(),
            partition.updated.len(),
            partition.deleted.len()
        );

        let callback = &callback;
        let deleted_names: Mutex<HashSet<&str>> = Mutex::new(HashSet::new());
        let deleted_names = &deleted_names;

        let delete_all_units = partition.updates_in_input_order().into_iter().map(|target| async move {
            let first = deleted_names
                .lock()
                .await
                .insert(target.op.canonical_name());
            if !first {
                return None;
            }
            match dispatch(RegistryAction::DeleteAll, target).await {
                Ok(()) => {
                    log::debug!(
                        "Registry [{}]: cleared [{}]",
                        target.registry_name,
                        target.op.canonical_name()
                    );
                    None
                }
                Err(source) => report(callback, target, RegistryAction::DeleteAll, Err(source)).err(),
            }
        });
        let mut failures: Vec<BatchOperationFailure> =
            join_all(delete_all_units).await.into_iter().flatten().collect();

        let mutate_units = partition.mutations().map(|(action, target)| async move {
            let result = dispatch(action, target).await;
            report(callback, target, action, result)
        });

        let mut success_count = 0;
        for outcome in join_all(mutate_units).await {
            match outcome {
                Ok(()) => success_count += 1,
                Err(failure) => failures.push(failure),
            }
        }
        failures.sort_by_key(|f| f.index);

        log::info!(
            "Batch finished: {success_count} succeeded, {} failed",
            failures.len()
        );
        Ok(BatchExecutionResult {
            success_count,
            failed_count: failures.len(),
            failures,
        })
    }
}
