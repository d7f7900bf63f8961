//! DTOs for decoding list item pages.

use serde::Deserialize;

use crate::domain::RawRecord;

/// One page of list items in `odata=nometadata` form.
#[derive(Debug, Deserialize)]
pub(super) struct ListItemsPageDto {
    #[serde(default)]
    pub(super) value: Vec<RawRecord>,
    #[serde(
        default,
        rename = "odata.nextLink",
        alias = "@odata.nextLink",
        alias = "__next"
    )]
    pub(super) next_link: Option<String>,
}
