/// A repository offered as a one-click example.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleRepository {
    pub name: &'static str,
    pub link: &'static str,
    /// Pre-computed metrics served as a static file instead of the API.
    pub json: Option<&'static str>,
}

pub const SAMPLE_REPOSITORIES: &[SampleRepository] = &[
    SampleRepository {
        name: "sirupsen/logrus",
        link: "github.com/sirupsen/logrus",
        json: None,
    },
    SampleRepository {
        name: "golang/dep",
        link: "github.com/golang/dep",
        json: None,
    },
    SampleRepository {
        name: "gohugoio/hugo",
        link: "github.com/gohugoio/hugo",
        json: Some("examples/hugo.json"),
    },
    SampleRepository {
        name: "spf13/cobra",
        link: "github.com/spf13/cobra",
        json: None,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::RepositoryId;

    #[test]
    fn sample_links_are_valid_repositories() {
        for sample in SAMPLE_REPOSITORIES {
            let id = RepositoryId::parse(sample.link).expect(sample.link);
            assert_eq!(id.short_name(), sample.name);
        }
    }
}
