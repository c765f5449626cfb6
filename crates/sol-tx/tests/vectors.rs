//! Known-answer tests for compilation and signing, driven through the public
//! API only.

use sol_tx::programs::{stake, system, token, STAKE_ID};
use sol_tx::*;

fn keypair(secret: &str) -> Keypair {
    Keypair::from_base58(secret).unwrap()
}

fn addr(text: &str) -> Address {
    text.parse().unwrap()
}

fn hash(text: &str) -> Hash {
    text.parse().unwrap()
}

fn legacy(instructions: &[Instruction], blockhash: &str) -> Transaction {
    let message = LegacyMessage::new(instructions, None, hash(blockhash)).unwrap();
    Transaction::new(message.into())
}

/// Wire form of `tx` with a single, externally produced signature.
fn with_signature(tx: &Transaction, signature: &str) -> String {
    let signature: Signature = signature.parse().unwrap();
    let mut wire = vec![1u8];
    wire.extend_from_slice(signature.as_bytes());
    wire.extend_from_slice(&tx.message_data().unwrap());
    bs58::encode(wire).into_string()
}

const ZERO_BLOCKHASH: &str = "11111111111111111111111111111111";

// ─── System transfers ──────────────────────────────────────────────

#[test]
fn transfer_message_data() {
    let ix = system::transfer(
        &addr("6eoo7i1khGhVm8tLBMAdq4ax2FxkKP4G7mCcfHyr3STN"),
        &addr("56B334QvCDMSirsmtEJGfanZm8GqeQarrSjdAb2MbeNM"),
        42,
    );
    let tx = legacy(&[ix], ZERO_BLOCKHASH);

    assert_eq!(
        hex::encode(tx.message_data().unwrap()),
        concat!(
            "0100010353f9d600fe925083bb399907ea648d23a6a081fc7e9059202fd725f7edd281dd",
            "3cc1ff9ba3c7a876c8082df2f8a36ea9342ce3819dd4b6fa72d4a18e04a5363a00000000",
            "000000000000000000000000000000000000000000000000000000000000000000000000",
            "00000000000000000000000000000000000000000000000001020200010c020000002a00",
            "000000000000",
        )
    );
}

#[test]
fn single_signer_transfer() {
    let key = keypair("A7psj2GW7ZMdY4E5hJq14KMeYg7HFjULSsWSrTXZLvYr");
    let ix = system::transfer(
        &key.address(),
        &addr("EN2sCsJ1WDV8UFqsiTXHcUPUxQ4juE71eCknHYYMifkd"),
        42,
    );
    let mut tx = legacy(&[ix], ZERO_BLOCKHASH);
    signer::sign(&[key], &mut tx).unwrap();

    assert_eq!(
        tx.signatures()[0].to_string(),
        "5T6uZBHnHFd8uWErDBTFRVkbKuhbcm94K5MJ2beTYDruzqv4FjS7EMKvC94ZfxNAiWUXZ6bZxS3WXUbhJwYNPWn"
    );
    assert_eq!(
        tx.to_base58().unwrap(),
        concat!(
            "3p2kzZ1DvquqC6LApPuxpTg5CCDVPqJFokGSnGhnBHrta4uq7S2EyehV1XNUVXp51D69GxGz",
            "QZUjikfDzbWBG2aFtG3gHT1QfLzyFKHM4HQtMQMNXqay1NAeiiYZjNhx9UvMX4uAQZ4Q6rx6",
            "m2AYfQ7aoMUrejq298q1wBFdtS9XVB5QTiStnzC7zs97FUEK2T4XapjF1519EyFBViTfHpGp",
            "nf5bfizDzsW9kYUtRDW1UC2LgHr7npgq5W9TBmHf9hSmRgM9XXucjXLqubNWE7HUMhbKjuBq",
            "kirRM",
        )
    );

    // A key that is not part of the message.
    let stranger = keypair("96PKHuMPtniu1T74RvUNkbDPXPPRZ8Mg1zXwciCAyaDq");
    let err = signer::sign(&[stranger], &mut tx).unwrap_err();
    assert_eq!(
        err.to_string(),
        "account not found: publicKey not found in message.accountKeys"
    );
}

#[test]
fn transfer_to_self() {
    let key = keypair("AevJ4EWcvQ6dptBDvF2Ri5pU6QSBjkzSGHMfbLFKa746");
    let ix = system::transfer(&key.address(), &key.address(), 42);
    let mut tx = legacy(&[ix], ZERO_BLOCKHASH);
    signer::sign(&[key], &mut tx).unwrap();

    assert_eq!(tx.message().account_keys().len(), 2);
    assert_eq!(
        tx.to_base58().unwrap(),
        concat!(
            "EKUmihvvUPKVN4GSCFwZRtz8WiyAuPvthW69Smo19SCjcPLQ6T7EVZd1HU71WAoe1bfgmPNS",
            "5JhU7ZLA9XKG3qbZqeEFJ1xmRwW9ZKw8SKMAL6VRWxp87oLu7PSmf5b8R34vCaww3XLKtZko",
            "P49a7TUK31DqPN5xJCceMB3BZJyaojQaKU8nUkzSGf89LY6abZXp9krKAebvc6bSMzTP8SHS",
            "vbmZbf3VtejmpQeN9X6e7WVDn6oDa2bGT",
        )
    );
}

#[test]
fn transfer_with_memo_and_reference() {
    let from = addr("zVSpQnbBZ7dyUWzXhrUQRsTYYNzoAdJWHsHSqhPj3Xu");
    let reference = addr("GaeTAQZyhVEocTC7iY8GztSyY5cBAJTkAUUA1kLFLMV");
    let instructions = vec![
        programs::memo::memo("HelloSolana73"),
        system::transfer(&from, &from, 42).with_references(&[reference]),
    ];
    let tx = legacy(&instructions, ZERO_BLOCKHASH);

    assert_eq!(
        with_signature(
            &tx,
            "3CFWDEK51noPJP4v2t8JZ3qj7kC7kLKyws9akfHMyuJnQ35EtzBptHqvaHfeswiLsvUSxzMVNoj4CuRxWtDD9zB1"
        ),
        concat!(
            "3pzQEdU38uMQgegTyRsRLi23NK4YokgZeSVLXYzFB7HShqZZH8FdBLqj6CeA2d2L8oR9KF2U",
            "aJPWbE8YBFmSdaafegoSXJtyj7ciwTjk5ieSXnPXtqH1TEcnMntZATg7gKpeFg6iehqdSUtZ",
            "uQD1PGmHA1TrzzqLpRSRrc1sqPz8EpSJcQr1Y41B1XCEAfSJDfcuNKrfFrnQaVtRz6tseQfd",
            "9uXNYNuR1NQSepWdav5wQiohLUMDiZtxuwb7FQkQ68WE1FDsHmd4JpbWKmDEjz7HFyQY37vf",
            "6NBJyX5qWJpFMSg5qGKWvhNCDM32yM4A7HhPeoTWEywE5CXcNmQqdbRt4BzF1A11uqv4etWj",
        )
    );
}

#[test]
fn transfer_with_durable_nonce() {
    let from = addr("sp6VUqq1nDEuU83bU2hstmEYrJNipJYpwS7gZ7Jv7ZH");
    let nonce = addr("ALAaqqt4Cc8hWH22GT2L16xKNAn6gv7XCTF7JkbfWsc");
    let instructions = vec![
        system::advance_nonce_account(&nonce, &from),
        system::transfer(
            &from,
            &addr("3UVYmECPPMZSCqWKfENfuoTv51fTDTWicX9xmBD2euKe"),
            1000,
        ),
    ];
    let tx = legacy(&instructions, "5ycoKxPRpW2GdD4byZuMptHU3VU5MgUCh6NLGQ2U8VE5");

    let header = tx.message().header();
    assert_eq!(header.num_required_signatures, 1);
    assert_eq!(header.num_readonly_signed_accounts, 0);
    assert_eq!(header.num_readonly_unsigned_accounts, 2);
    assert_eq!(tx.message().account_keys().len(), 5);

    assert_eq!(
        with_signature(
            &tx,
            "4c4LhPFsDQdwZnVqKtgDC1GVR63GU5REFvonAW3RF7Quo4b1YbUrsXMmwYCfD3LGrUawThPaAixCUKnoGdMMQ7BQ"
        ),
        concat!(
            "6zRqmNP5waeyartbf8GuQrWxdSy4SCYBTEmGhiXfYNxQTuUrvrBjia18YoCM367AQZWZ5yTj",
            "cN6FaXuaPWju7aVZNFjyqpuMZLNEbpm8ZNmKP4Na2VzR59iAdSPEZGTPuesZEniNMAD7ZSux",
            "6fayxgwrEwMWjeiskFQEwdvFzKNHfNLbjoVpdSTxhKiqfbwxnFBpBxNE4nqMj3bUR37cYJAF",
            "oDFokxy23HGpV93V9mbGG89aLBNQnd9LKTjpYFv49VMd48mptUd7uyrRwZLMneew2Bxq3PLs",
            "j9SaJyCWbsnqYj6bBahhsErz67PJTJepx4BEhqRxHGUSbpeNiL7qyERri1GZsXhN8fgU3nPi",
            "Yr7tMMxuLAoUFRMJ79HCex7vxhf7SapvcP",
        )
    );
}

// ─── Multiple signers and blockhash updates ────────────────────────

#[test]
fn multiple_signers_in_any_order() {
    let key0 = keypair("96PKHuMPtniu1T74RvUNkbDPXPPRZ8Mg1zXwciCAyaDq");
    let key1 = keypair("GvGmNPMQLZE2VNx3KG2GdiC4ndS8uCqd7PjioPgm9Qhi");
    assert_eq!(
        key0.address().to_string(),
        "GymAh18wHuFTytfSJWi8eYTA9x5S3sNb9CJSGBWoPRE3"
    );
    assert_eq!(
        key1.address().to_string(),
        "2oKoYSAHgveX91917v4DUEuN8BNKXDg8KJWpaGyEay9V"
    );

    let program = programs::SYSTEM_ID;
    let ix = Instruction::new(
        program,
        vec![
            AccountMeta::readonly(key0.address(), true),
            AccountMeta::readonly(key1.address(), false),
        ],
        vec![0, 0, 0, 0],
    );
    let account_keys = vec![key0.address(), key1.address(), program];
    let message = LegacyMessage {
        header: MessageHeader {
            num_required_signatures: 2,
            num_readonly_signed_accounts: 0,
            num_readonly_unsigned_accounts: 1,
        },
        instructions: compile::compile_instructions(&[ix], &account_keys).unwrap(),
        account_keys,
        recent_blockhash: hash(ZERO_BLOCKHASH),
    };

    let mut tx = Transaction::new(message.into());
    signer::sign(&[key1, key0], &mut tx).unwrap();

    assert_eq!(
        tx.signatures()[0].to_string(),
        "37beWPhNMfWUz75Tb24TX3PCS89FZscbCgwwLpFnzVfZYPqDpAWruvqzc9eeQYft35H23Vm9Tv1dPwEKWT3vAVPb"
    );
    assert_eq!(
        tx.signatures()[1].to_string(),
        "5NxQshVaAXtQ8YVdcBtCanT62KbxnRfhubjGndFvetgn9AiaoLVZvRGutR5D7FJebRxq8bd6nQXn59LFzavEUrdQ"
    );
    assert_eq!(
        tx.to_base58().unwrap(),
        concat!(
            "oL2CmkcP9xf2DiU7eo6hh3JdHnX3NGjunheXYo6SjVchzc8LtFJpPs4jccWUd7oPZUPQNTcR",
            "7EeHn259ror9A7aXgJdP4djhntoD8irF1kuBZCj7pubtoWfiAKzagSL4hChQsTSe7e9jaGto",
            "Xu58mPHCMKTz55TLjhdmCj7ixoWRowWEzkrF49MxXnurb4yf6ASru1XdHPFn3DdzkRHgypYw",
            "vRM6ci8p27trQvXFukhWX6qG6JkxqsWYSzACcAAGGWfAxSi63Yx1RxkxGUzyxy5f2thQhWZ6",
            "Nx6pR1im65yVYMYPXj94kgtHxXw9h5V4p7xSAwRpmhw4jewYyQVX4jmnfro3gFNdX9AqpqMs",
            "4uGHA4rZM",
        )
    );
}

#[test]
fn sign_with_updated_blockhash() {
    let key = keypair("G4VSzrknPBWZ1z2YwUnWTxD1td7wmqR5jMPEJRN6wm8S");
    let ix = system::transfer(
        &key.address(),
        &addr("4iSnyfDKaejniaPc2pBBckwQqV3mDS93go15NdxWJq2y"),
        42,
    );
    let mut tx = legacy(&[ix], ZERO_BLOCKHASH);
    let keys = [key];
    signer::sign(&keys, &mut tx).unwrap();

    signer::sign_update_blockhash(
        &keys,
        &mut tx,
        hash("GgBaCs3NCBuZN12kCJgAW63ydqohFkHEdfdEXBPzLHq"),
    )
    .unwrap();

    assert_eq!(
        tx.signatures()[0].to_string(),
        "5AFhXjvGdENXCAe9MPvUA2qjoL4XtZwZKG7kK2HmZf1ibpxjx5kzogHZjN39uYB9J33UFJN15KhSggBZhzyNQmta"
    );
    assert_eq!(
        tx.to_base58().unwrap(),
        concat!(
            "62ABadDCoPfGGRnhLoBhfcPekMHyN5ee8DgTY8wD4iwKDjyFAsNbsaahTcqMWxmwa61q9iAG",
            "CQBv1bETcYzWsTwLKMVGLoEpwqA84mPjqHyr5sQD5dcghyQiQ1ckYNub9K7s8FspVwwowK8g",
            "JG69xeDEaqi7G1zrChBVbQYTmVUwJETyDmP1Vs8QU3CaxBs8qwcxoziU52KWLBpRj9o38QVB",
            "dxJtJ7highgPKJubfqUfTWdN94PzqEfyPqwoCpFD39nvBn8C5xe1caPKivicg6U7Lzm9s8RY",
            "TLCEB",
        )
    );
}

#[test]
fn sign_raw_message_bytes() {
    let key = keypair("GjXseuD8JavBjKMdd6GEsPYZPV7tMMa46GS2JRS5tHRq");
    assert_eq!(
        key.address().to_string(),
        "3BocAWPm1oNXN5qkAV4QeDUmAPpkTcN1rrmCMWAfsXJY"
    );

    let raw = hex::decode(concat!(
        "01000203207be13c43c4528592eaf3fd34e064c641c5be3cb6691877d7ade94dff367341",
        "08eaea30723c33b52507bc54024910612f885e4c80c10b99a047fd42c0acbace00000000",
        "000000000000000000000000000000000000000000000000000000000404040404040404",
        "04040404040404040404040404040404040404040404040401020200010c020000002a00",
        "000000000000",
    )).unwrap();
    let wire = signer::sign_raw_message(&[key], &raw).unwrap();

    assert_eq!(
        hex::encode(wire),
        concat!(
            "016e7f8349977b482bccf0bfc202ad917295803831e59ccb865b97d657464791ebfe3336",
            "879b84b9f165e464a34751fe30d54b01f3c9f33f969aafe1e85951b10901000203207be1",
            "3c43c4528592eaf3fd34e064c641c5be3cb6691877d7ade94dff36734108eaea30723c33",
            "b52507bc54024910612f885e4c80c10b99a047fd42c0acbace0000000000000000000000",
            "000000000000000000000000000000000000000000040404040404040404040404040404",
            "040404040404040404040404040404040401020200010c020000002a00000000000000",
        )
    );
}

#[test]
fn signed_transaction_parses_back() {
    let tx = Transaction::from_base58(concat!(
        "oL2CmkcP9xf2DiU7eo6hh3JdHnX3NGjunheXYo6SjVchzc8LtFJpPs4jccWUd7oPZUPQNTcR",
        "7EeHn259ror9A7aXgJdP4djhntoD8irF1kuBZCj7pubtoWfiAKzagSL4hChQsTSe7e9jaGto",
        "Xu58mPHCMKTz55TLjhdmCj7ixoWRowWEzkrF49MxXnurb4yf6ASru1XdHPFn3DdzkRHgypYw",
        "vRM6ci8p27trQvXFukhWX6qG6JkxqsWYSzACcAAGGWfAxSi63Yx1RxkxGUzyxy5f2thQhWZ6",
        "Nx6pR1im65yVYMYPXj94kgtHxXw9h5V4p7xSAwRpmhw4jewYyQVX4jmnfro3gFNdX9AqpqMs",
        "4uGHA4rZM",
    )).unwrap();

    assert_eq!(tx.signatures().len(), 2);
    assert!(tx.verify().is_ok());
    assert!(!tx.message().is_v0());
}

// ─── Stake ─────────────────────────────────────────────────────────

#[test]
fn delegate_stake_with_blockhash_seeded_account() {
    let key = keypair("AevJ4EWcvQ6dptBDvF2Ri5pU6QSBjkzSGHMfbLFKa746");
    let vote = addr("4jpwTqt1qZoR7u6u639z2AngYFGN3nakvKhowcnRZDEC");
    let blockhash = hash(ZERO_BLOCKHASH);

    let stake_account = address_from_recent_blockhash(&key.address(), &blockhash, &STAKE_ID);
    let instructions = stake::deposit_stake(&key.address(), &vote, 42, &blockhash, None);
    assert_eq!(instructions[2].accounts[0].pubkey, stake_account);

    let mut tx = legacy(&instructions, ZERO_BLOCKHASH);
    signer::sign(&[key], &mut tx).unwrap();

    assert_eq!(
        tx.signatures()[0].to_string(),
        "58iogHzSJZmvTxi71W8k2yZXSPVfGAgtgqrk1RaBtfVFewU9yiJCkvSF1Hhjyax5DuexzR7ryWZDAWKQ73pyqvMs"
    );
    assert_eq!(
        tx.to_base58().unwrap(),
        concat!(
            "j24mVM9Zgu5vDZhPLGGuCRXQnP9djNtxdHh4txN3S7dwJsNNL5fbhzGpPgSUAcLGoMVCfF9T",
            "uqTYfpfJnb4sJFe1ahM8yPL5HwuKL6py5AZJFi8SWx9fvaVB699dCPo1GT3JoEBLPCZ9o2jQ",
            "tnwzLkzTYJnKv2axqhKWFE2sz6TBA5J39eZcjMFUYgyxz6Q5S4MWqYQCb8UET2NAEZoKcfy7",
            "j8N25WXL6Gj4j3hBZjpHQQNaGaNEprEqyma3ZuVhpGiCALSsuzVLX3wZVo4icXwe952deMFA",
            "4tH3BK1jcSQCgfmcKDJ9nd7bdrnUUs4BoMdF1uDZB5LxE2UH8QiqtYvaUcorF4SJ3gPxM5yk",
            "byPsNK1cSYZF9NMpW2GofyC17eELwnHQTQB2kqphxJZu7BahvkwiDPPeeydiXAkBspJ3nc3P",
            "CBujv6WJw22ZHw5j6zAP8ZGnCW44pqtWD5qifF9tTKhySKdANNiWifs3tSCCPQqjfJXu14dr",
            "NinR6VG8rJxS1qgmRYiRQUa7m1vtoaZFRN5qKUeAfoFKkAVaNnMdwgsNqNH4dqBodTCJFs1L",
            "kYwhgRZdZGbwXTn1j7vpR3DSnv4g72i2H556srzK53jdUmdv6yfxt516XDSshqZtHnKZ1tud",
            "xKjBXwsqT3imDiZFVka9wKWUAYMCi4XZ79CY6Xpsd9c18U2e9TCngQmgkTATFgrqysfraokN",
            "ffgqWxvsPMugksbvbPjJs3iCzByvphkC9p7hCf6LwbeF8XnVB91EAgRDA4VLE1f9wkcq5zjy",
            "879YWJ4r516h3PQszTz1EaJXNAXdbk5Em7eyuuabGP1Q3nijFTL2yhMDsXpgrjAuEAABNxFM",
            "d4J1JRMaic615mHrhwociksrsfQK",
        )
    );
}

#[test]
fn delegate_stake_with_validator_seeded_account() {
    let key = keypair("AevJ4EWcvQ6dptBDvF2Ri5pU6QSBjkzSGHMfbLFKa746");
    let vote = addr("4jpwTqt1qZoR7u6u639z2AngYFGN3nakvKhowcnRZDEC");
    let blockhash = hash(ZERO_BLOCKHASH);

    let stake_account = address_from_validator_seed(&key.address(), &vote, &STAKE_ID);
    let instructions =
        stake::deposit_stake(&key.address(), &vote, 42, &blockhash, Some(&stake_account));

    let mut tx = legacy(&instructions, ZERO_BLOCKHASH);
    signer::sign(&[key], &mut tx).unwrap();

    assert_eq!(
        tx.signatures()[0].to_string(),
        "gDPbnakbktrASmnUwKGpmftvQRbcyAvxyAyVXq3oVLfAdTPDqY8hhLPHTgidEZGWcmiaXnEyKg2GQLkkAh3JYr3"
    );
    assert_eq!(
        tx.to_base58().unwrap(),
        concat!(
            "TKPiN35HzeD3zdwxDFvnkgoqud7CZsda15JkBwM4nDpr623rM7MZsH6QvMMyKpiz7MeRNTrf",
            "yHkRLQSBT9Tbg2mgTdfrbhhqeF3Suu5ECphqn8DFYPoMnFzeg5u9gaqevfjhuizzeo2YDJF8",
            "aVGy1pez8gMbp5vHz1SuvQUgfcvFctggUMwNiJorSmmp3N6TzQSd38CZrA8ZLhaJjuwDwVMj",
            "mj18rGTV1gkX19L7byTFrus2vNvPeUa2AawwUnFpYMPgvCKkHTrpnjvypjoLof9yMUFQ5M1S",
            "3Ntv53KJyXwXq6ejJnBDtisnDcdMDNSZp3VeKz6XCr8XVM5xNVh3LX12V4kc3ueqkokYJLP1",
            "JmuhA3nNZA1G5KTNno93HUoBkEa1x5h3haoCSgmQC97LoJbJM6B6C2NbaDj2J6iiTaVQdin4",
            "He4Jpj575WDhNTqsLjzFUHPUHQF1CRnuss8UpVyMsa4kdVqCDQGeh5DKbkikgcB8GKPBuC91",
            "DRxGEqgoygNsu5nnQy4o3YAJnBBK6HsKxpdjbYD8wCUdLw8muhjpEqeBTPShEaogm9zfehid",
            "iCcnxbeoX3gmW8oH9gpWoX7GrkJgF6Wn7iWohmrzqzAjoBz8hpeY5nkkhHrf9iswVGMpakdL",
            "Gy3YxkGJVpsW8KJACwEKXGLq8SVLtXSUHG8EP16zfYHxKjkCSs8PkdFsA5esxsxppPTVZivu",
            "EPqJ5og55aNmugdNDrAFYWdcH1Q4rm7BXN6oHECdz2yY4HFVWh9u592oqozt2gQKu3vmhcNF",
            "zzQe1xgs6zKSv38kSGTnipd7Hx2VL3qNAR6XBRiwAi226qSTzxi6R82p7cMB7TMy6fk5AZ3s",
            "XDSXFNJ9S5SSU1V63ruw75QMtVio",
        )
    );
}

// ─── Tokens ────────────────────────────────────────────────────────

#[test]
fn create_associated_token_account() {
    let key = keypair("9YtuoD4sH4h88CVM8DSnkfoAaLY7YeGC2TarDJ8eyMS5");
    let mint = addr("SRMuApVNdxXokk5GT7XD5cUUgXMBCoAz2LHeuAoKWRt");
    let token_account =
        find_associated_token_address(&key.address(), &mint, TokenProgram::Token).unwrap();
    assert_eq!(
        token_account.to_string(),
        "EDNd1ycsydWYwVmrYZvqYazFqwk1QjBgAUKFjBoz1jKP"
    );

    let ix = token::create_associated_token_account(
        &key.address(),
        &key.address(),
        &mint,
        &token_account,
        TokenProgram::Token,
    );
    let mut tx = legacy(&[ix], "9ipJh5xfyoyDaiq8trtrdqQeAhQbQkWy2eANizKvx75K");
    signer::sign(&[key], &mut tx).unwrap();

    assert_eq!(
        tx.signatures()[0].to_string(),
        "3doYbPs5rES3TeDSrntqUvMgXCDE2ViJX2SFhLtiptVNkqPuixXs1SwU5LUZ3KwHnCzDUth6BRr3vU3gqnuUgRvQ"
    );
    assert_eq!(
        tx.to_base58().unwrap(),
        concat!(
            "CKzRLx3AQeVeLQ7T4hss2rdbUpuAHdbwXDazxtRnSKBuncCk3WnYgy7XTrEiya19MJviYHYd",
            "Txi9gmWJY8qnR2vHVnH2DbPiKA8g72rD3VvMnjosGUBBvCwbBLge6FeQdgczMyRo9n5PcHvg",
            "9yJBTJaEEvuewyBVHwCGyGQci7eYd26xtZtCjAjwcTq4gGr3NZbeRW6jZp6j6APuew7jys4M",
            "KYRV4xPodua1TZFCkyWZr1XKzmPh7KTavtN5VzPDA8rbsvoEjHnKzjB2Bszs6pDjcBFSHyQq",
            "GsHoF8XPD35BLfjDghNtBmf9cFqo5axa6oSjANAuYg6cMSP4Hy28waSj8isr6gQjE315hWi3",
            "W1swwwPcn322gYZx6aMAcmjczaxX9aktpHYgZxixF7cYWEHxJs5QUK9mJePu9Xc6yW75UB4Y",
            "nx6dUgaSTEUzoQthF2TN3xXwu1",
        )
    );
}

#[test]
fn token_transfer_checked() {
    let key = keypair("9YtuoD4sH4h88CVM8DSnkfoAaLY7YeGC2TarDJ8eyMS5");
    let ix = token::transfer_checked(
        &addr("EDNd1ycsydWYwVmrYZvqYazFqwk1QjBgAUKFjBoz1jKP"),
        &addr("SRMuApVNdxXokk5GT7XD5cUUgXMBCoAz2LHeuAoKWRt"),
        &addr("3WUX9wASxyScbA7brDipioKfXS1XEYkQ4vo3Kej9bKei"),
        &key.address(),
        4000,
        6,
        TokenProgram::Token,
    );
    let mut tx = legacy(&[ix], "CNaHfvqePgGYMvtYi9RuUdVxDYttr1zs4TWrTXYabxZi");
    signer::sign(&[key], &mut tx).unwrap();

    assert_eq!(
        tx.signatures()[0].to_string(),
        "3vZ67CGoRYkuT76TtpP2VrtTPBfnvG2xj6mUTvvux46qbnpThgQDgm27nC3yQVUZrABFjT9Qo7vA74tCjtV5P9Xg"
    );
    assert_eq!(
        tx.to_base58().unwrap(),
        concat!(
            "PGfKqEaH2zZXDMZLcU6LUKdBSzU1GJWJ1CJXtRYCxaCH7k8uok38WSadZfrZw3TGejiau7nS",
            "pan2GvbK26hQim24jRe2AupmcYJFrgsdaCt1Aqs5kpGjPqzgj9krgxTZwwob3xgC1NdHK5Bc",
            "NwhxwRtrCphGEH7zUFpGFrFrHzgpf2KY8FvPiPELQyxzTBuyNtjLjMMreehSKShEjD9Xzp1Q",
            "eC1pEF8JL6vUKzxMXuveoEYem8q8JiWszYzmTMfDk13JPgv7pXFGMqDV3yNGCLsWccBeSFKN",
            "4UKECre6x2QbUEiKGkHkMc4zQwwyD8tGmEMBAGm339qdANssEMNpDeJp2LxLDStSoWShHnot",
            "crH7pUa94xCVvCPPaomF",
        )
    );
}
