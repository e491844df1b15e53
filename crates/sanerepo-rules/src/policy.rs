/// The two named package partitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Partition {
    EsmOnly,
    CjsOnly,
}

impl Partition {
    /// Field name in the settings file.
    pub fn as_str(self) -> &'static str {
        match self {
            Partition::EsmOnly => "esmOnly",
            Partition::CjsOnly => "cjsOnly",
        }
    }

    pub fn shape(self) -> PackageShape {
        match self {
            Partition::EsmOnly => PackageShape::EsmOnly,
            Partition::CjsOnly => PackageShape::CjsOnly,
        }
    }
}

/// Packaging shape a package is held to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PackageShape {
    /// Module build plus a legacy CommonJS build (the default).
    Dual,
    EsmOnly,
    CjsOnly,
}

/// Package names that opt out of the dual-format shape.
///
/// Both lists behave as ordered sets: first appearance wins, duplicates are dropped.
/// Keeping the two disjoint is the settings layer's job.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PartitionConfig {
    pub esm_only: Vec<String>,
    pub cjs_only: Vec<String>,
}

impl PartitionConfig {
    pub fn new<I, J, S, T>(esm_only: I, cjs_only: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            esm_only: dedup(esm_only.into_iter().map(Into::into)),
            cjs_only: dedup(cjs_only.into_iter().map(Into::into)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.esm_only.is_empty() && self.cjs_only.is_empty()
    }

    pub fn members(&self, partition: Partition) -> &[String] {
        match partition {
            Partition::EsmOnly => &self.esm_only,
            Partition::CjsOnly => &self.cjs_only,
        }
    }

    /// Every partitioned package: `esm_only` first, then `cjs_only`.
    pub fn partitioned(&self) -> Vec<String> {
        self.esm_only
            .iter()
            .chain(self.cjs_only.iter())
            .cloned()
            .collect()
    }

    /// First package listed in both partitions, if any.
    pub fn overlap(&self) -> Option<&str> {
        self.esm_only
            .iter()
            .find(|name| self.cjs_only.contains(name))
            .map(String::as_str)
    }
}

fn dedup(names: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for name in names {
        if !out.contains(&name) {
            out.push(name);
        }
    }
    out
}
