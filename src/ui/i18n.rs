use std::fmt;
use std::rc::Rc;

/// Label resolver injected into the table and the app shell.
#[derive(Clone)]
pub struct Labels(Rc<dyn Fn(&str) -> String>);

impl Labels {
    pub fn new(resolve: impl Fn(&str) -> String + 'static) -> Self {
        Self(Rc::new(resolve))
    }

    pub fn get(&self, key: &str) -> String {
        (self.0)(key)
    }

    /// Resolves `key` and substitutes `{name}` placeholders.
    pub fn format(&self, key: &str, args: &[(&str, String)]) -> String {
        let mut text = self.get(key);
        for (name, value) in args {
            text = text.replace(&format!("{{{name}}}"), value);
        }
        text
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self::new(|key| english(key).map(str::to_string).unwrap_or_else(|| key.to_string()))
    }
}

impl PartialEq for Labels {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Labels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Labels(..)")
    }
}

pub fn english(key: &str) -> Option<&'static str> {
    let text = match key {
        "table.search" => "Search",
        "table.search_placeholder" => "Search…",
        "table.rows_per_page" => "Rows per page",
        "table.columns" => "Columns",
        "table.density" => "Density",
        "table.density.compact" => "Compact",
        "table.density.cozy" => "Cozy",
        "table.density.comfortable" => "Comfortable",
        "table.reset" => "Reset",
        "table.page_of" => "Page {page} of {count}",
        "table.total" => "{total} rows",
        "table.prev" => "Previous",
        "table.next" => "Next",
        "table.go_to_page" => "Go to page",
        "table.of_pages" => "of {count}",
        "table.clear_sort" => "Clear sort",
        "table.actions" => "Actions",
        "table.empty" => "No records",
        "table.show_more" => "Show {count} more",
        "table.show_less" => "Show less",
        "app.title" => "SiteDesk",
        "app.tab.customers" => "Customers",
        "app.tab.projects" => "Projects",
        "app.tab.team" => "Team",
        "app.import_csv" => "Import CSV",
        "app.ready" => "Ready",
        "app.loading" => "Loading…",
        "app.all_statuses" => "All",
        "app.clear_filters" => "Clear filters",
        "app.imported" => "Imported {count} records",
        "app.import_failed" => "Import failed: {error}",
        "app.load_failed" => "Load failed: {error}",
        "app.init_failed" => "Database init failed: {error}",
        "app.db_path_failed" => "Unable to resolve database path: {error}",
        "app.open" => "Open",
        "customer.name" => "Customer",
        "customer.contact" => "Contact",
        "customer.email" => "Email",
        "customer.phone" => "Phone",
        "customer.city" => "City",
        "customer.since" => "Customer since",
        "customer.active" => "Active",
        "project.code" => "Code",
        "project.name" => "Project",
        "project.customer" => "Customer",
        "project.site" => "Site address",
        "project.manager" => "Manager",
        "project.status" => "Status",
        "project.budget" => "Budget",
        "project.start_date" => "Start date",
        "project.status.planned" => "Planned",
        "project.status.in_progress" => "In progress",
        "project.status.on_hold" => "On hold",
        "project.status.completed" => "Completed",
        "team.name" => "Name",
        "team.role" => "Role",
        "team.trade" => "Trade",
        "team.email" => "Email",
        "team.phone" => "Phone",
        "team.rate" => "Hourly rate",
        "team.active" => "Active",
        "common.yes" => "Yes",
        "common.no" => "No",
        _ => return None,
    };
    Some(text)
}
