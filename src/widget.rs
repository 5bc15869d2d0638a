//! One mounted picker popup and the fields it serves.
//!
//! Each `PickerWidget` owns its catalog, search index and open/closed state,
//! so several independent pickers can live in one process. Content is built
//! lazily on first use and exactly once.

use std::cell::{Cell, OnceCell};
use std::collections::BTreeMap;

use tracing::debug;

use crate::catalog::{
    self, BuildOptions, Catalog, EntryId, RawEmojiRecord, SectionOrders, tab_icon,
};
use crate::config::Config;
use crate::convert::{self, Converter, Segment};
use crate::error::{PickerError, Result};
use crate::insert::TextTarget;
use crate::search::{self, QueryResult, SearchIndex};

/// Everything derived from the dataset. Read-only once built.
#[derive(Clone, Debug)]
pub struct PickerContent {
    catalog: Catalog,
    index: SearchIndex,
    converter: Converter,
}

impl PickerContent {
    pub fn build(
        records: &[RawEmojiRecord],
        orders: &SectionOrders,
        options: &BuildOptions,
        allow_native: bool,
    ) -> Result<Self> {
        let catalog = catalog::build(records, orders, options)?;
        let index = SearchIndex::build(&catalog);
        let converter = Converter::new(&catalog).allow_native(allow_native);
        Ok(Self {
            catalog,
            index,
            converter,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    pub fn converter(&self) -> &Converter {
        &self.converter
    }

    pub fn query(&self, q: &str) -> QueryResult {
        search::query(&self.index, q)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PickerId(usize);

/// The kind of input a picker button is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    PlainText,
    Editable,
}

#[derive(Clone, Debug)]
struct Picker {
    field: FieldKind,
    open: bool,
}

/// What the hover preview pane shows for one entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Preview {
    pub id: EntryId,
    pub glyph: Option<String>,
    pub name: String,
    pub short_name: String,
    pub aliases: String,
}

pub struct PickerWidget {
    records: Vec<RawEmojiRecord>,
    orders: SectionOrders,
    options: BuildOptions,
    text_mode: bool,
    allow_native: bool,
    content: OnceCell<PickerContent>,
    builds: Cell<usize>,
    pickers: BTreeMap<PickerId, Picker>,
    next_id: usize,
    opened: Option<PickerId>,
    result: Option<QueryResult>,
}

impl PickerWidget {
    pub fn new(records: Vec<RawEmojiRecord>, orders: SectionOrders, options: BuildOptions) -> Self {
        Self {
            records,
            orders,
            options,
            text_mode: true,
            allow_native: false,
            content: OnceCell::new(),
            builds: Cell::new(0),
            pickers: BTreeMap::new(),
            next_id: 0,
            opened: None,
            result: None,
        }
    }

    pub fn from_config(config: &Config, records: Vec<RawEmojiRecord>) -> Self {
        Self::new(
            records,
            config.section_orders.clone(),
            config.build_options(),
        )
        .with_text_mode(config.text_mode)
        .with_allow_native(config.allow_native)
    }

    /// Insert `:shorthand:` (true) or the native glyph (false).
    pub fn with_text_mode(mut self, text_mode: bool) -> Self {
        self.text_mode = text_mode;
        self
    }

    pub fn with_allow_native(mut self, allow_native: bool) -> Self {
        self.allow_native = allow_native;
        self
    }

    /// Build the catalog and index on first call; later calls return the
    /// same instance without rebuilding. A failed build is not cached.
    pub fn init(&self) -> Result<&PickerContent> {
        if let Some(content) = self.content.get() {
            return Ok(content);
        }
        let built = PickerContent::build(
            &self.records,
            &self.orders,
            &self.options,
            self.allow_native,
        )?;
        self.builds.set(self.builds.get() + 1);
        debug!(entries = built.catalog.len(), "picker content ready");
        Ok(self.content.get_or_init(|| built))
    }

    pub fn is_initialized(&self) -> bool {
        self.content.get().is_some()
    }

    /// How many times content has actually been built. Diagnostic only;
    /// stays at 1 after the first successful `init`.
    pub fn builds(&self) -> usize {
        self.builds.get()
    }

    pub fn attach(&mut self, field: FieldKind) -> PickerId {
        let id = PickerId(self.next_id);
        self.next_id += 1;
        self.pickers.insert(id, Picker { field, open: false });
        id
    }

    pub fn field_kind(&self, id: PickerId) -> Option<FieldKind> {
        self.pickers.get(&id).map(|p| p.field)
    }

    /// Toggle a picker. Returns whether it is open afterwards. Opening one
    /// picker closes whichever other picker was open.
    pub fn open(&mut self, id: PickerId) -> Result<bool> {
        let was_open = self
            .pickers
            .get(&id)
            .map(|p| p.open)
            .ok_or(PickerError::UnknownPicker(id.0))?;
        if was_open {
            self.close();
            return Ok(false);
        }

        let total = self.init()?.catalog.len();
        self.close();
        if let Some(picker) = self.pickers.get_mut(&id) {
            picker.open = true;
        }
        self.opened = Some(id);
        if self.result.is_none() {
            self.result = Some(QueryResult::reset(total));
        }
        Ok(true)
    }

    pub fn close(&mut self) {
        if let Some(id) = self.opened.take()
            && let Some(picker) = self.pickers.get_mut(&id)
        {
            picker.open = false;
        }
    }

    pub fn is_open(&self, id: PickerId) -> bool {
        self.pickers.get(&id).is_some_and(|p| p.open)
    }

    pub fn opened(&self) -> Option<PickerId> {
        self.opened
    }

    pub fn search(&mut self, q: &str) -> Result<&QueryResult> {
        let result = self.init()?.query(q);
        let stored: &QueryResult = self.result.insert(result);
        Ok(stored)
    }

    /// Latest search result, if the popup has been opened or searched.
    pub fn result(&self) -> Option<&QueryResult> {
        self.result.as_ref()
    }

    /// Write the chosen entry plus a trailing space into `target` and close
    /// the open picker.
    pub fn select(&mut self, entry: EntryId, target: &mut dyn TextTarget) -> Result<()> {
        let content = self.init()?;
        let record = content
            .catalog
            .get(entry)
            .ok_or(PickerError::UnknownEntry(entry.0))?;
        let text = if self.text_mode {
            record.shorthand()
        } else {
            record.glyph().unwrap_or_else(|| record.shorthand())
        };
        target.insert(&format!("{text} "));
        self.close();
        Ok(())
    }

    pub fn preview(&self, entry: EntryId) -> Result<Preview> {
        let record = self
            .init()?
            .catalog
            .get(entry)
            .ok_or(PickerError::UnknownEntry(entry.0))?;
        Ok(Preview {
            id: entry,
            glyph: record.glyph(),
            name: record.name.clone(),
            short_name: record.short_name.clone(),
            aliases: record.aliases(),
        })
    }

    /// Entry shown on a category's tab button.
    pub fn tab_icon(&self, category: &str) -> Result<Option<EntryId>> {
        let content = self.init()?;
        Ok(tab_icon(category).and_then(|name| content.converter.lookup(name)))
    }

    pub fn render(&self, text: &str) -> Result<Vec<Segment>> {
        Ok(self.init()?.converter.convert(text))
    }

    pub fn render_to_string(&self, text: &str) -> Result<String> {
        let content = self.init()?;
        let segments = content.converter.convert(text);
        Ok(convert::glyph_text(&segments, &content.catalog))
    }
}
