//! SARIF 2.1.0 report template.
//!
//! The scanner's `--format template` pass consumes a Go template; this one
//! shapes the report as SARIF 2.1.0 with the scanned Dockerfile as the
//! artifact location. The template body is scanner input, written verbatim
//! into the run's working directory.

use hullscan_core::{Error, Result};
use std::path::{Path, PathBuf};

const DOCKERFILE_PLACEHOLDER: &str = "__DOCKERFILE_PATH__";

const SARIF_TEMPLATE: &str = r##"{
  "$schema": "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json",
  "version": "2.1.0",
  "runs": [
    {
      "tool": {
        "driver": {
          "name": "Trivy",
          "rules": [
        {{- $t_first := true }}
        {{- range $result := . }}
            {{- $vulnerabilityType := .Type }}
            {{- range .Vulnerabilities -}}
              {{- if $t_first -}}
                {{- $t_first = false -}}
              {{ else -}}
                ,
              {{- end }}
            {
              "id": {{ printf "%s: %s-%s %s" $result.Target .PkgName .InstalledVersion .VulnerabilityID | toJson }},
              "name": "{{ toSarifRuleName $vulnerabilityType }}",
              "shortDescription": {
                "text": {{ printf "%v Package: %v" .VulnerabilityID .PkgName | printf "%q" }}
              },
              "fullDescription": {
                "text": {{ endWithPeriod (escapeString .Title) | printf "%q" }}
              },
              "defaultConfiguration": {
                "level": "{{ toSarifErrorLevel .Vulnerability.Severity }}"
              }
              {{- with $help_uri := .PrimaryURL -}}
              ,
              {{ $help_uri | printf "\"helpUri\": %q," -}}
              {{- else -}}
              ,
              {{- end }}
              "help": {
                "text": {{ printf "Vulnerability %v\nSeverity: %v\nPackage: %v\nInstalled Version: %v\nFixed Version: %v\nLink: [%v](%v)" .VulnerabilityID .Vulnerability.Severity .PkgName .InstalledVersion .FixedVersion .VulnerabilityID .PrimaryURL | printf "%q"}},
                "markdown": {{ printf "**Vulnerability %v**\n| Severity | Package | Installed Version | Fixed Version | Link |\n| --- | --- | --- | --- | --- |\n|%v|%v|%v|%v|[%v](%v)|\n" .VulnerabilityID .Vulnerability.Severity .PkgName .InstalledVersion .FixedVersion .VulnerabilityID .PrimaryURL | printf "%q"}}
              },
              "properties": {
                "tags": [
                  "vulnerability",
                  "{{ .Vulnerability.Severity }}",
                  {{ .PkgName | printf "%q" }}
                ],
                "precision": "very-high"
              }
            }
            {{- end -}}
         {{- end -}}
          ]
        }
      },
      "results": [
    {{- $t_first := true }}
    {{- range $result := . }}
        {{- $filePath := .Target }}
        {{- range $index, $vulnerability := .Vulnerabilities -}}
          {{- if $t_first -}}
            {{- $t_first = false -}}
          {{ else -}}
            ,
          {{- end }}
        {
          "ruleId": {{ printf "%s: %s-%s %s" $result.Target .PkgName .InstalledVersion .VulnerabilityID | toJson }},
          "ruleIndex": {{ $index }},
          "level": "{{ toSarifErrorLevel $vulnerability.Vulnerability.Severity }}",
          "message": {
            "text": {{ endWithPeriod (escapeString $vulnerability.Description) | printf "%q" }}
          },
          "locations": [{
            "physicalLocation": {
              "artifactLocation": {
                "uri": "__DOCKERFILE_PATH__"
              },
              "region": {
                "startLine": 1,
                "startColumn": 1,
                "endLine": 1,
                "endColumn": 1
              }
            }
          }]
        }
        {{- end -}}
      {{- end -}}
      ],
      "columnKind": "utf16CodeUnits"
    }
  ]
}"##;

/// Write the SARIF template into `work_dir`, recording `dockerfile` as the
/// artifact location, and return its path.
///
/// # Errors
///
/// Returns an I/O error when the template file cannot be written.
pub fn write_template(work_dir: &Path, dockerfile: &Path) -> Result<PathBuf> {
    let tpl_path = work_dir.join("sarif.tpl");
    let body = SARIF_TEMPLATE.replace(DOCKERFILE_PLACEHOLDER, &dockerfile.to_string_lossy());
    std::fs::write(&tpl_path, body)
        .map_err(|e| Error::io(e, Some(tpl_path.clone()), "write sarif template"))?;
    Ok(tpl_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_template_with_dockerfile_path() {
        let dir = tempfile::tempdir().unwrap();
        let tpl = write_template(dir.path(), Path::new("docker/Dockerfile")).unwrap();
        let body = std::fs::read_to_string(&tpl).unwrap();
        assert!(body.contains(r#""uri": "docker/Dockerfile""#));
        assert!(!body.contains(DOCKERFILE_PLACEHOLDER));
        assert!(body.contains("sarif-schema-2.1.0"));
    }
}
