//! Handlers for the resource commands.
//!
//! Handlers return data and leave printing to the binary. Each one checks the
//! route guard for the resource's page before any request is made.

use std::sync::Arc;

use anyhow::{Context as _, bail};
use edudesk::widgets::MultiSelect;
use edudesk::{
    DrawerController, ListController, ListQuery, ListState, Resource, ResourceApi, SortOrder,
    Transport,
};
use edudesk_auth::{Route, RouteDecision, SessionStore};
use edudesk_config::ListConfig;
use edudesk_core::{ClientResult, MultiValue};
use edudesk_models::SelectOption;
use tracing::debug;

use crate::args::{Selection, field_value};

/// Everything a command needs to talk to the API.
#[derive(Clone)]
pub struct Context {
    pub transport: Arc<dyn Transport>,
    pub session: SessionStore,
    pub list_config: ListConfig,
}

impl Context {
    fn api<R: Resource>(&self) -> ResourceApi<R> {
        ResourceApi::new(Arc::clone(&self.transport))
    }
}

/// Fail unless the guard would render `route`.
pub fn ensure_route(session: &SessionStore, route: Route) -> anyhow::Result<()> {
    match route.guard(session) {
        RouteDecision::Render => Ok(()),
        RouteDecision::Redirect(Route::Login) => {
            bail!("Not logged in. Run `edudesk login` first.")
        }
        RouteDecision::Redirect(to) => bail!(
            "You do not have access to {} (redirected to {})",
            route.path(),
            to.path()
        ),
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListArgs {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub search: Option<String>,
    pub filters: Vec<(String, String)>,
    pub sort: Option<String>,
    pub ascending: bool,
}

impl ListArgs {
    /// Apply to a query. The page goes last since every other change
    /// resets it.
    fn apply(&self, query: &mut ListQuery) -> ClientResult<()> {
        if let Some(size) = self.size {
            query.set_page_size(size)?;
        }
        for (name, value) in &self.filters {
            query.set_filter(name, value);
        }
        if let Some(text) = &self.search {
            query.set_search(text);
        }
        if let Some(field) = &self.sort {
            query.sort_by(field);
        }
        let wanted = if self.ascending {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        };
        if query.sort_order() != wanted {
            let field = query.sort_field().to_string();
            query.sort_by(&field);
        }
        if let Some(page) = self.page {
            query.set_page(page);
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ListOutput<T> {
    pub query: ListQuery,
    pub state: ListState<T>,
    pub window: Vec<u32>,
}

pub async fn list<R: Resource>(
    ctx: &Context,
    args: &ListArgs,
) -> anyhow::Result<ListOutput<R::Record>> {
    ensure_route(&ctx.session, R::ROUTE)?;
    let controller = ListController::<R>::new(ctx.api(), ctx.session.clone(), &ctx.list_config);
    controller.edit_query(|query| args.apply(query))?;
    controller.refresh().await?;
    Ok(ListOutput {
        query: controller.query(),
        state: controller.state(),
        window: controller.window(),
    })
}

pub async fn show<R: Resource>(ctx: &Context, id: i64) -> anyhow::Result<R::Record> {
    ensure_route(&ctx.session, R::ROUTE)?;
    let record = ctx
        .api::<R>()
        .get(id)
        .await
        .with_context(|| format!("Failed to load {} {id}", R::NAME))?;
    Ok(record)
}

pub async fn options<R: Resource>(ctx: &Context) -> anyhow::Result<Vec<SelectOption>> {
    ensure_route(&ctx.session, R::ROUTE)?;
    Ok(ctx.api::<R>().options().await?)
}

/// Field edits collected from `--set`, `--toggle` and `--select`.
#[derive(Debug, Clone, Default)]
pub struct Edits {
    pub set: Vec<(String, String)>,
    pub toggle: Vec<(String, String)>,
    pub select: Vec<Selection>,
}

impl Edits {
    pub fn is_empty(&self) -> bool {
        self.set.is_empty() && self.toggle.is_empty() && self.select.is_empty()
    }
}

/// Apply edits to an open drawer in the order given on the command line.
pub fn apply_edits<R: Resource>(drawer: &DrawerController<R>, edits: &Edits) -> ClientResult<()> {
    for (name, raw) in &edits.set {
        drawer.set_field(name, field_value(raw))?;
    }
    for (name, label) in &edits.toggle {
        drawer.toggle_field(name, label)?;
    }
    for selection in &edits.select {
        drawer.select(&selection.field, selection.id, &selection.label)?;
    }
    Ok(())
}

/// Current labels of a multi-valued draft field.
pub fn current_values<R: Resource>(
    drawer: &DrawerController<R>,
    field: &str,
) -> anyhow::Result<MultiValue> {
    let Some(draft) = drawer.draft() else {
        bail!("The form is not open");
    };
    let fields = serde_json::to_value(draft)?;
    match fields.get(field) {
        Some(value) => Ok(serde_json::from_value(value.clone())?),
        None => bail!("{} has no field named {field}", R::NAME),
    }
}

/// Build the picker for a multi-valued field: the field's choices plus any
/// current label that is not among them.
pub fn picker_for<R: Resource>(
    drawer: &DrawerController<R>,
    field: &str,
) -> anyhow::Result<MultiSelect> {
    if !R::is_multi_value(field) {
        bail!("{field} is not a multi-valued {} field", R::NAME);
    }
    let current = current_values(drawer, field)?;
    let mut choices = R::field_options(field);
    for label in &current {
        if !choices.iter().any(|c| &c.label == label) {
            choices.push(SelectOption::plain(label.as_str()));
        }
    }
    if choices.is_empty() {
        bail!("{field} has no predefined choices; use --toggle {field}=<label>");
    }
    Ok(MultiSelect::new(choices, current))
}

/// Let the user tick labels for `field`, then toggle the difference into
/// the draft.
fn pick<R: Resource>(drawer: &DrawerController<R>, field: &str) -> anyhow::Result<()> {
    let picker = picker_for(drawer, field)?;
    let labels: Vec<String> = picker.options().iter().map(|o| o.label.clone()).collect();
    let defaults: Vec<bool> = labels.iter().map(|l| picker.is_selected(l)).collect();

    let chosen = dialoguer::MultiSelect::new()
        .with_prompt(format!("{field} (space to toggle, enter to accept)"))
        .items(&labels[..])
        .defaults(&defaults[..])
        .interact()?;
    let target: Vec<String> = chosen.into_iter().map(|i| labels[i].clone()).collect();

    for label in picker.changes_to(&target) {
        drawer.toggle_field(field, &label)?;
    }
    Ok(())
}

/// Create (`id == None`) or edit a record through the drawer controller.
pub async fn save<R: Resource>(
    ctx: &Context,
    id: Option<i64>,
    edits: &Edits,
    picks: &[String],
) -> anyhow::Result<()> {
    ensure_route(&ctx.session, R::ROUTE)?;
    // Checked up front so a refused edit never fetches the record.
    let required = if id.is_some() { R::EDIT } else { R::ADD };
    if !ctx.session.has_permission(required) {
        bail!("Permission denied: {} is required", required);
    }
    let drawer = DrawerController::<R>::new(ctx.api(), ctx.session.clone());

    drawer.open(id).await?;
    apply_edits(&drawer, edits)?;
    for field in picks {
        pick(&drawer, field)?;
    }
    debug!(resource = R::PATH, ?id, "Submitting form");
    drawer.submit().await?;
    Ok(())
}

pub async fn delete<R: Resource>(ctx: &Context, id: i64, confirmed: bool) -> anyhow::Result<()> {
    ensure_route(&ctx.session, R::ROUTE)?;
    let controller = ListController::<R>::new(ctx.api(), ctx.session.clone(), &ctx.list_config);
    controller.delete_row(id, confirmed).await?;
    Ok(())
}
