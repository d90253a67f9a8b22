use general_jws::{JWSHeader, JWSHeaderUnion};

/// Where the header of a new signature goes.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum HeaderPlacement {
    /// Everything in the integrity-protected header.
    Protected,
    /// Everything in the unprotected header.
    Unprotected,
    /// "alg" and "typ" in the protected header; "alg" and "kid" in the unprotected header.
    Both,
}

impl HeaderPlacement {
    pub fn header_union(
        self,
        alg: &str,
        kid_o: Option<&str>,
        typ_o: Option<&str>,
    ) -> general_jws::Result<JWSHeaderUnion> {
        let kid_o = kid_o.map(str::to_string);
        let typ_o = typ_o.map(str::to_string);
        match self {
            Self::Protected => {
                let mut header = JWSHeader::new(alg);
                header.kid_o = kid_o;
                header.typ_o = typ_o;
                JWSHeaderUnion::protected(header)
            }
            Self::Unprotected => {
                let mut header = JWSHeader::new(alg);
                header.kid_o = kid_o;
                header.typ_o = typ_o;
                Ok(JWSHeaderUnion::unprotected(header))
            }
            Self::Both => {
                let mut protected = JWSHeader::new(alg);
                protected.typ_o = typ_o;
                let mut unprotected = JWSHeader::new(alg);
                unprotected.kid_o = kid_o;
                JWSHeaderUnion::both(protected, unprotected)
            }
        }
    }
}
