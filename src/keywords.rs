/// Canonical language names and the extra surface forms that count for them.
pub const LANGUAGE_SYNONYMS: &[(&str, &[&str])] = &[
    ("C", &[]),
    ("C++", &["CPlusPlus", "CPP"]),
    ("Java", &[]),
    ("Python", &[]),
    ("JavaScript", &["JS"]),
    ("Ruby", &[]),
    ("PHP", &[]),
    ("Swift", &[]),
    ("Kotlin", &[]),
    ("Go", &["Golang"]),
    ("Rust", &[]),
    ("TypeScript", &["TS"]),
    ("Perl", &[]),
    ("Haskell", &[]),
    ("Scala", &[]),
    ("Groovy", &[]),
    ("Lua", &[]),
    ("R", &[]),
    ("Julia", &[]),
    ("MATLAB", &[]),
    ("Shell", &["Bash"]),
    ("HTML", &[]),
    ("CSS", &[]),
    ("SQL", &[]),
    ("Assembly", &[]),
    ("Objective-C", &[]),
    ("VB.NET", &[]),
    ("F#", &[]),
    ("Dart", &[]),
    ("Delphi", &[]),
    ("COBOL", &[]),
    ("Fortran", &[]),
    ("Ada", &[]),
    ("Lisp", &[]),
    ("Prolog", &[]),
    ("Erlang", &[]),
    ("Scheme", &[]),
    ("Smalltalk", &[]),
    ("Logo", &[]),
    ("PL/SQL", &[]),
    ("ActionScript", &[]),
    ("ABAP", &[]),
    ("VBScript", &[]),
    ("PowerShell", &[]),
    ("Objective-C++", &[]),
];

pub const FRAMEWORK_SYNONYMS: &[(&str, &[&str])] = &[
    ("Node.js", &["NodeJS", "Node", "Express.js"]),
    ("React", &["React.js", "ReactJS"]),
    ("jQuery", &[]),
    ("Express", &["Express.js", "Node.js Express"]),
    ("Angular", &["AngularJS"]),
    ("Next.js", &["NextJS"]),
    ("ASP.NET", &[".NET"]),
    ("Vue.js", &["VueJS"]),
    ("WordPress", &["CMS"]),
    ("Flask", &[]),
    ("Springboot", &["Spring Boot"]),
    ("Django", &[]),
    ("Laravel", &[]),
    ("FastAPI", &[]),
    ("Svelte", &["Svelte.js"]),
    ("Ruby", &["Ruby on Rails"]),
    ("NestJS", &["Nest.js"]),
    ("Blazor", &["ASP.NET Blazor"]),
    ("Nuxt.js", &["NuxtJS"]),
    ("Symfony", &[]),
    ("Deno", &[]),
    ("Gatsby", &["Gatsby.js"]),
    ("Fastify", &[]),
    ("Phoenix", &[]),
    ("Drupal", &["CMS"]),
    ("CodeIgniter", &[]),
    ("Solid.js", &["SolidJS"]),
    ("Remix", &["Remix.js"]),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    name: String,
    synonyms: Vec<String>,
}

impl Category {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lowercased, deduplicated surface forms. The first one is always the name itself.
    pub fn synonyms(&self) -> &[String] {
        &self.synonyms
    }
}

/// Ordered mapping from category name to its case-insensitive synonyms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordDictionary {
    label: String,
    categories: Vec<Category>,
}

impl KeywordDictionary {
    /// Builds a dictionary; the canonical name is added as a synonym of its own category,
    /// so every category has at least one. Repeated category names are merged.
    pub fn new<N, S, I>(label: impl Into<String>, entries: I) -> Self
    where
        N: Into<String>,
        S: IntoIterator,
        S::Item: AsRef<str>,
        I: IntoIterator<Item = (N, S)>,
    {
        let mut categories: Vec<Category> = Vec::new();

        for (name, synonyms) in entries {
            let name = name.into();
            let index = match categories.iter().position(|c| c.name == name) {
                Some(index) => index,
                None => {
                    categories.push(Category {
                        synonyms: vec![name.to_lowercase()],
                        name,
                    });
                    categories.len() - 1
                }
            };

            let category = &mut categories[index];
            for synonym in synonyms {
                let synonym = synonym.as_ref().trim().to_lowercase();
                if !synonym.is_empty() && !category.synonyms.contains(&synonym) {
                    category.synonyms.push(synonym);
                }
            }
        }

        Self {
            label: label.into(),
            categories,
        }
    }

    pub fn languages() -> Self {
        Self::new("Language", LANGUAGE_SYNONYMS.iter().copied())
    }

    pub fn frameworks() -> Self {
        Self::new("Framework", FRAMEWORK_SYNONYMS.iter().copied())
    }

    /// Singular heading used in reports, e.g. "Language".
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn lookup(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
