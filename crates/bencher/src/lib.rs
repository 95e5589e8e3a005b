#[derive(Debug, Copy, Clone)]
pub struct TestCase {
    name: &'static str,
    group: TestGroup,
    sections: usize,
}

impl TestCase {
    pub fn new(name: &'static str, group: TestGroup, sections: usize) -> Self {
        Self { name, group, sections }
    }

    pub fn small(name: &'static str, sections: usize) -> Self {
        Self::new(name, TestGroup::Small, sections)
    }

    pub fn normal(name: &'static str, sections: usize) -> Self {
        Self::new(name, TestGroup::Normal, sections)
    }

    pub fn large(name: &'static str, sections: usize) -> Self {
        Self::new(name, TestGroup::Large, sections)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn group(&self) -> TestGroup {
        self.group
    }

    pub fn sections(&self) -> usize {
        self.sections
    }
}

#[derive(Clone, Copy, Debug)]
pub enum TestGroup {
    Small,
    Normal,
    Large,
}

/// Builds the file list of a synthetic routes tree: the root template,
/// not-found, layout and route modules, plus `sections` top-level sections
/// each carrying a literal route, a layout and a parameterized subroute.
pub fn synthetic_tree(sections: usize) -> Vec<String> {
    let mut files = vec![
        "index.tsx".to_owned(),
        "404.tsx".to_owned(),
        "layout.tsx".to_owned(),
        "route.tsx".to_owned(),
    ];
    for i in 0..sections {
        files.push(format!("section{i}/route.tsx"));
        files.push(format!("section{i}/layout.tsx"));
        files.push(format!("section{i}/:id/route.tsx"));
    }
    files
}
