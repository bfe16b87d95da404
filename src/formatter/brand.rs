use super::LinePass;

pub const BRAND: &str = "NOTED.";
pub const BRAND_STYLE: &str = "color: #8B5CF6; font-weight: bold;";

#[derive(Debug, Default, Clone, Copy)]
pub struct BrandPass;

impl LinePass for BrandPass {
    fn name(&self) -> &str {
        "brand"
    }

    fn process(&self, line: &str) -> String {
        line.replace(
            BRAND,
            &format!("<span style=\"{}\">{}</span>", BRAND_STYLE, BRAND),
        )
    }
}
