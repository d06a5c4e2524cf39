//! Identities signing through the bundled schemes, checked by verifiers that
//! never see the signing identity.

use anyhow::Result;
use gridable_credentials::{
    Did, Ed25519KeyResolver, Ed25519Signer, HmacKeyring, Identity, IdentityError, Principal,
    RequireMethod, sign_with, verify,
};

#[gridable_common::test]
async fn it_verifies_ed25519_identities_from_their_did_alone() -> Result<()> {
    let identity = Ed25519Signer::import(&[3; 32])?.into_identity();
    let signature = identity.sign(b"content hash").await?;

    let claimed: Did = identity.id().to_string().parse()?;
    assert_eq!(claimed.method(), "key");
    assert!(verify(&signature, &claimed, b"content hash", &Ed25519KeyResolver).await);
    assert!(!verify(&signature, &claimed, b"other hash", &Ed25519KeyResolver).await);

    let stranger = Ed25519Signer::import(&[4; 32])?;
    assert!(!verify(&signature, stranger.did(), b"content hash", &Ed25519KeyResolver).await);
    Ok(())
}

#[gridable_common::test]
async fn it_verifies_hmac_identities_through_a_keyring() -> Result<()> {
    let alice: Did = "did:ex:A".parse()?;
    let keyring = HmacKeyring::new().with_key(alice.clone(), b"secret".to_vec());
    let identity = Identity::builder()
        .identifier("did:ex:A")
        .shared_signer(std::sync::Arc::new(keyring.signer(&alice).unwrap()))
        .try_build()?;

    let signature = identity.sign(b"h1").await?;
    assert!(verify(&signature, &alice, b"h1", &keyring).await);
    assert!(!verify(&signature, &alice, b"h2", &keyring).await);
    assert!(!verify(&signature, &"did:ex:B".parse()?, b"h1", &keyring).await);
    Ok(())
}

#[gridable_common::test]
async fn it_narrows_verifiers_to_did_methods() -> Result<()> {
    let identity = Ed25519Signer::import(&[5; 32])?.into_identity();
    let signature = identity.sign(b"h1").await?;

    let only_web = RequireMethod::new(["web"], Ed25519KeyResolver);
    assert!(!verify(&signature, identity.id(), b"h1", &only_web).await);

    let only_key = RequireMethod::new(["key"], Ed25519KeyResolver);
    assert!(verify(&signature, identity.id(), b"h1", &only_key).await);
    Ok(())
}

#[gridable_common::test]
fn it_refuses_incomplete_identities() {
    let signer = || sign_with(|_: &[u8]| Ok(String::from("sig")));

    assert_eq!(
        Identity::builder().signer(signer()).try_build().err(),
        Some(IdentityError::MissingIdentifier)
    );
    assert_eq!(
        Identity::builder().identifier("did:ex:A").try_build().err(),
        Some(IdentityError::MissingSigner)
    );
    assert!(matches!(
        Identity::builder().identifier("alice").signer(signer()).try_build(),
        Err(IdentityError::InvalidIdentifier(_))
    ));
}
