use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::artifacts::status::status_info::StatusInfo;
use std::collections::BTreeMap;
use std::io::Write;

impl Repository {
    pub fn status(&self) -> anyhow::Result<StatusInfo> {
        let state = self.load_state()?;
        let head = self.head_commit(&state)?;

        let branches = state
            .refs()
            .branches()
            .keys()
            .map(|name| (name.clone(), state.refs().is_current_branch(name)))
            .collect();

        let working = self
            .workspace()
            .list_files()?
            .into_iter()
            .map(|filename| {
                let blob = self.workspace().parse_blob(&filename)?;
                Ok((filename, blob.object_id().clone()))
            })
            .collect::<anyhow::Result<BTreeMap<_, _>>>()?;

        let status = StatusInfo::compute(branches, head.files(), state.index(), &working);
        write!(self.writer(), "{}", status)?;

        Ok(status)
    }
}
