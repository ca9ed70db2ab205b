use tm_model::RouteIdx;

/// One diagnostic: a route plus up to three waypoint labels, an error
/// code, and a free-form info string. Three label slots is enough for
/// every check the engine performs; unused slots are empty strings.
#[derive(Debug, Clone)]
pub struct DatacheckEntry {
    pub route: RouteIdx,
    pub root: String,
    pub label1: String,
    pub label2: String,
    pub label3: String,
    pub code: String,
    pub info: String,
    pub fp: bool,
}

impl DatacheckEntry {
    pub fn new(
        route: RouteIdx,
        root: impl Into<String>,
        label1: impl Into<String>,
        label2: impl Into<String>,
        label3: impl Into<String>,
        code: impl Into<String>,
        info: impl Into<String>,
    ) -> Self {
        Self {
            route,
            root: root.into(),
            label1: label1.into(),
            label2: label2.into(),
            label3: label3.into(),
            code: code.into(),
            info: info.into(),
            fp: false,
        }
    }

    /// CSV-style rendering used both for the sort key and for log output:
    /// `root;label1;label2;label3;code;info`.
    pub fn render(&self) -> String {
        format!(
            "{};{};{};{};{};{}",
            self.root, self.label1, self.label2, self.label3, self.code, self.info
        )
    }

    /// Match against a `datacheckfps.csv` row in every field but `info`.
    pub fn matches_except_info(&self, fp_row: &FpRow) -> bool {
        self.root == fp_row.root
            && self.label1 == fp_row.label1
            && self.label2 == fp_row.label2
            && self.label3 == fp_row.label3
            && self.code == fp_row.code
    }
}

/// A row parsed from `datacheckfps.csv`.
#[derive(Debug, Clone)]
pub struct FpRow {
    pub root: String,
    pub label1: String,
    pub label2: String,
    pub label3: String,
    pub code: String,
    pub info: String,
}
