use std::path::Path;
use std::rc::Rc;

use anyhow::Result;
use tracing::info;

use crate::domain::entities::customer::Customer;
use crate::domain::entities::project::Project;
use crate::domain::entities::team_member::TeamMember;
use crate::domain::entities::EntityKind;
use crate::infra::import::csv::read_csv_records;
use crate::usecase::ports::repo::DirectoryRepository;

pub struct ImportService {
    repo: Rc<dyn DirectoryRepository>,
}

impl ImportService {
    pub fn new(repo: Rc<dyn DirectoryRepository>) -> Self {
        Self { repo }
    }

    /// Imports every record of a CSV file as `kind`; returns the row count.
    pub fn import_csv(&self, kind: EntityKind, path: &Path) -> Result<usize> {
        let inserted = match kind {
            EntityKind::Customers => {
                let records = read_csv_records::<Customer>(path)?;
                self.repo.insert_customers(&records)?
            }
            EntityKind::Projects => {
                let records = read_csv_records::<Project>(path)?;
                self.repo.insert_projects(&records)?
            }
            EntityKind::TeamMembers => {
                let records = read_csv_records::<TeamMember>(path)?;
                self.repo.insert_team_members(&records)?
            }
        };
        info!(kind = kind.key(), inserted, path = %path.display(), "csv import finished");
        Ok(inserted)
    }
}
