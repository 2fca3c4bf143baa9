use syn::parse::ParseStream;
use syn::{Attribute, Expr, Ident, LitStr, Token};

use crate::RECORD_ATTRIBUTE_NAME;

/// Options parsed from the `#[record(...)]` attributes of one field.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    pub required: bool,
    pub ignore: bool,
    pub skip_flat: bool,
    pub base: Option<Ident>,
    pub rename: Option<LitStr>,
    /// `@expr` values, in declaration order.
    pub custom: Vec<Expr>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if attr.path().is_ident(RECORD_ATTRIBUTE_NAME) {
                attr.parse_args_with(|input: ParseStream| this.parse_stream(input))?;
            }
        }

        if let Some(base) = &this.base
            && (this.required || this.ignore || this.skip_flat || this.rename.is_some() || !this.custom.is_empty())
        {
            return Err(syn::Error::new(
                base.span(),
                "`base` cannot be combined with other field options",
            ));
        }

        Ok(this)
    }

    fn parse_stream(&mut self, input: ParseStream) -> syn::Result<()> {
        while !input.is_empty() {
            if input.peek(Token![@]) {
                input.parse::<Token![@]>()?;
                self.custom.push(input.parse()?);
            } else {
                let ident: Ident = input.parse()?;
                match ident.to_string().as_str() {
                    "required" => self.required = true,
                    "ignore" => self.ignore = true,
                    "skip_flat" => self.skip_flat = true,
                    "base" => self.base = Some(ident),
                    "rename" => {
                        input.parse::<Token![=]>()?;
                        let name: LitStr = input.parse()?;
                        if name.value().is_empty() || name.value().contains('\0') {
                            return Err(syn::Error::new(
                                name.span(),
                                "field names must be non-empty and free of NUL bytes",
                            ));
                        }
                        self.rename = Some(name);
                    }
                    _ => {
                        return Err(syn::Error::new(
                            ident.span(),
                            "expected one of `required`, `ignore`, `skip_flat`, `base`, `rename = \"..\"` or `@expr`",
                        ));
                    }
                }
            }

            if input.is_empty() {
                break;
            }
            input.parse::<Token![,]>()?;
        }
        Ok(())
    }
}
